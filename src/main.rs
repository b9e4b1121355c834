use std::process::ExitCode;

use clap::Parser;

use classcheck_class_file::{ClassPath, ClassShape};

/// Checks that a compiled class has the layout of a class with one public no-argument
/// constructor. Classes are looked up in the directories listed in `CLASSPATH`.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Fully qualified class name, e.g. `org.example.Foo`.
    class_name_including_package: String,
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let class_name = &cli.class_name_including_package;

    let class_path = ClassPath::from_env();
    log::debug!("class path: {:?}", class_path.roots());

    match class_path.read_class(class_name, &ClassShape::default()) {
        Ok(class_file) => {
            log::info!("{} matches the expected layout", class_name);
            log::debug!("{:#?}", class_file);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}: {}", class_name, e);
            ExitCode::FAILURE
        }
    }
}
