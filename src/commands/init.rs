use camino::Utf8PathBuf;
use clap::Parser;
use github_metadata::Result;
use github_metadata::config::Config;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path (format chosen by extension: toml, yml, yaml, json)
    #[arg(value_name = "PATH", default_value = "github-metadata.toml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    Config::default().save(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
