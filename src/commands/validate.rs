use camino::Utf8PathBuf;
use clap::Parser;
use reflect_export::Result;
use reflect_export::options::ParsingOptions;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to parsing options file [default: one of reflect-options.[toml|yml|yaml|json] ]
    #[arg(long, short = 'o', value_name = "PATH")]
    pub options: Option<Utf8PathBuf>,
}

#[expect(clippy::unnecessary_wraps, reason = "Consistent interface with other subcommands")]
pub fn validate_options(args: &ValidateArgs) -> Result<()> {
    let base = Utf8PathBuf::from(".");
    let options_path = args.options.as_ref();

    match ParsingOptions::load(&base, options_path) {
        Ok(_) => {
            println!("Options validation successful");
            if let Some(path) = options_path {
                println!("Options file: {path}");
            } else {
                println!("Using built-in defaults (no options file found)");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Options validation failed: {e}");
            std::process::exit(1);
        }
    }
}
