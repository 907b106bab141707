use anyhow::bail;
use clap::{command, Arg};
use std::{path::PathBuf, time::Duration};

use indexgen::{
    config::Config,
    indexer::generate_index,
    timestamp::GitCli,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("markdown_dir")
                .help("Directory path of Markdown articles")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("markdown"),
            Arg::new("excerpt_length")
                .long("excerpt-length")
                .help("Maximum excerpt length in characters")
                .value_parser(clap::value_parser!(usize))
                .default_value("150"),
            Arg::new("git_timeout")
                .long("git-timeout")
                .help("Seconds to wait for the git timestamp lookup")
                .value_parser(clap::value_parser!(u64))
                .default_value("5"),
        ])
        .get_matches();

    let markdown_dir: &PathBuf = matches.get_one("markdown_dir").unwrap();
    if markdown_dir.exists() && !markdown_dir.is_dir() {
        bail!("{} is not a directory", markdown_dir.display());
    }
    let excerpt_max_len = *matches.get_one::<usize>("excerpt_length").unwrap();
    let git_timeout = Duration::from_secs(*matches.get_one::<u64>("git_timeout").unwrap());

    let config = Config {
        markdown_dir: markdown_dir.to_owned(),
        excerpt_max_len,
        git_timeout,
        ..Config::default()
    };

    let git = GitCli::new(config.git_timeout);
    generate_index(&config, &git)
}
