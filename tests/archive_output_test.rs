use clap::Parser;
use linkwrite::args::LinkWriteCli;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_linkwrite(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linkwrite"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute linkwrite command")
}

fn write_input(dir: &Path, name: &str, content: &[u8]) {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to create input file");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))
            .expect("Failed to set permissions");
    }
}

#[test]
fn test_tar_contains_symlink_then_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_input(temp_dir.path(), "hello.txt", b"hi");

    let output = run_linkwrite(temp_dir.path(), &["hello.txt", "/etc/passwd", "out.tar"]);

    assert!(
        output.status.success(),
        "linkwrite command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let file = File::open(temp_dir.path().join("out.tar")).expect("Failed to open archive");
    let mut archive = tar::Archive::new(file);
    let mut entries = archive.entries().expect("Failed to list entries");

    let link = entries.next().expect("Missing symlink entry").unwrap();
    assert_eq!(link.header().entry_type(), tar::EntryType::Symlink);
    assert_eq!(link.path().unwrap(), Path::new("hello.txt"));
    assert_eq!(
        link.link_name().unwrap().map(|l| l.into_owned()),
        Some(PathBuf::from("/etc/passwd"))
    );
    assert_eq!(link.header().size().unwrap(), 0);
    #[cfg(unix)]
    assert_eq!(link.header().mode().unwrap(), 0o644);
    drop(link);

    let mut file_entry = entries.next().expect("Missing file entry").unwrap();
    assert_eq!(file_entry.header().entry_type(), tar::EntryType::Regular);
    assert_eq!(file_entry.path().unwrap(), Path::new("hello.txt"));
    assert_eq!(file_entry.header().size().unwrap(), 2);
    let mut content = String::new();
    file_entry.read_to_string(&mut content).unwrap();
    assert_eq!(content, "hi");
    drop(file_entry);

    assert!(entries.next().is_none(), "Archive should hold exactly two entries");
}

#[test]
fn test_zip_contains_symlink_then_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_input(temp_dir.path(), "hello.txt", b"hello, zip");

    let output = run_linkwrite(
        temp_dir.path(),
        &["hello.txt", "../../etc/passwd", "out.zip", "--type=zip"],
    );

    assert!(
        output.status.success(),
        "linkwrite command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let file = File::open(temp_dir.path().join("out.zip")).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Output is not a valid zip");
    assert_eq!(archive.len(), 2);

    {
        let mut link = archive.by_index(0).unwrap();
        assert_eq!(link.name(), "hello.txt");
        assert_eq!(link.unix_mode().unwrap() & 0o170000, 0o120000);
        let mut body = String::new();
        link.read_to_string(&mut body).unwrap();
        assert_eq!(body, "../../etc/passwd");
    }

    let mut file_entry = archive.by_index(1).unwrap();
    assert_eq!(file_entry.name(), "hello.txt");
    let mut body = Vec::new();
    file_entry.read_to_end(&mut body).unwrap();
    assert_eq!(body, b"hello, zip");
}

#[test]
fn test_short_type_flag_and_link_name() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_input(temp_dir.path(), "payload.sh", b"#!/bin/sh\n");

    let output = run_linkwrite(
        temp_dir.path(),
        &["payload.sh", "/usr/local/bin/tool", "out.zip", "-t", "zip", "-l", "tool"],
    );

    assert!(
        output.status.success(),
        "linkwrite command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let file = File::open(temp_dir.path().join("out.zip")).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Output is not a valid zip");
    assert_eq!(archive.by_index(0).unwrap().name(), "tool");
    assert_eq!(archive.by_index(1).unwrap().name(), "payload.sh");
}

#[test]
fn test_existing_output_is_overwritten() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_input(temp_dir.path(), "hello.txt", b"hi");
    fs::write(temp_dir.path().join("out.tar"), vec![b'x'; 8192]).unwrap();

    let output = run_linkwrite(temp_dir.path(), &["hello.txt", "/etc/passwd", "out.tar"]);

    assert!(output.status.success());
    let len = fs::metadata(temp_dir.path().join("out.tar")).unwrap().len();
    assert_eq!(len, 512 * 5);
}

#[test]
fn test_run_returns_written_archive_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("hello.txt");
    let output = temp_dir.path().join("out.zip");
    fs::write(&input, "hi").expect("Failed to create input file");

    let cli = LinkWriteCli::parse_from([
        "linkwrite",
        input.to_str().unwrap(),
        "/etc/passwd",
        output.to_str().unwrap(),
        "--type=zip",
    ]);
    let written = linkwrite::run(&cli).expect("run failed");

    assert_eq!(written, output);
    let archive = zip::ZipArchive::new(File::open(&output).unwrap()).expect("Invalid zip");
    assert_eq!(archive.len(), 2);
}
