use camino::Utf8PathBuf;
use clap::Parser;
use reflect_export::Result;
use reflect_export::options::ParsingOptions;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output options file path
    #[arg(value_name = "PATH", default_value = "reflect-options.yml")]
    pub output: Utf8PathBuf,
}

pub fn init_options(args: &InitArgs) -> Result<()> {
    ParsingOptions::write_default(&args.output)?;
    println!("Generated default parsing options file: {}", args.output);
    Ok(())
}
