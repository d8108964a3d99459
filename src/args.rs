use clap::Parser;

#[derive(Parser, Debug)]
#[clap(
    name = "linkwrite",
    author,
    version,
    about = "Create an archive containing a provided file and a symlink that points to the write destination.",
    long_about = None
)]
pub struct LinkWriteCli {
    /// Input file.
    #[clap(value_parser)]
    pub input: String,

    /// Target destination in the filesystem.
    #[clap(value_parser)]
    pub target: String,

    /// Output file.
    #[clap(value_parser)]
    pub output: String,

    /// Type of the archive. (tar, zip)
    #[clap(short = 't', long = "type", value_name = "TYPE", default_value = "tar")]
    pub archive_type: String,

    /// Archive name of the symlink entry.
    /// Defaults to the input path, so both entries share one name.
    #[clap(short = 'l', long, value_name = "NAME", verbatim_doc_comment)]
    pub link_name: Option<String>,

    /// Enable verbose output.
    #[clap(short = 'v', long)]
    pub verbose: bool,
}
