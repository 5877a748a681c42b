use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to break down
    #[clap(short, long, default_value = ".")]
    pub dir: String,

    /// Glob for entries to leave out
    #[clap(short, long, default_value = "")]
    pub ignore: String,

    /// Scan the home directory instead of --dir
    #[clap(long)]
    pub home: bool,

    /// Include dotfiles and dot-directories
    #[clap(long)]
    pub hidden: bool,

    /// Print the breakdown and exit instead of opening a window
    #[clap(short, long)]
    pub report: bool,

    /// RON style file for the pie
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds per pie transition, overrides the style file
    #[clap(short = 's', long)]
    pub animation_speed: Option<f64>,
}

impl Args {
    pub fn root(&self) -> PathBuf {
        if self.home {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
        PathBuf::from(&self.dir)
    }
}

pub fn get_args() -> Args {
    Args::parse()
}
