use crate::GlobalArgs;
use anyhow::Result;
use colored::Colorize;
use mockview_infrastructure::ConfigService;

pub fn init(args: &GlobalArgs) -> Result<()> {
    let service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    if service.write_default()? {
        println!("Wrote {}", service.path().display().to_string().bright_green());
    } else {
        println!(
            "{} already exists, leaving it untouched",
            service.path().display()
        );
    }
    Ok(())
}
