use anyhow::Result;
use owo_colors::OwoColorize;
use reminders_core::ExportConfig;

pub fn run(init: bool) -> Result<()> {
    let config_path = ExportConfig::config_path()?;

    if init {
        if ExportConfig::create_default_config(&config_path)? {
            println!("{} {}", "Created".green(), config_path.display());
        } else {
            println!("{}", "Config file already exists, leaving it untouched".dimmed());
        }
    }

    let config = ExportConfig::load_from(&config_path)?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!();
    println!("{}", "Effective settings".bold());
    println!("  include_lists:      {:?}", config.include_lists);
    println!("  exclude_lists:      {:?}", config.exclude_lists);
    println!("  include_completed:  {}", config.include_completed);
    println!("  output_format:      {}", config.output_format);
    println!("  provider:           {}", config.provider);
    if let Some(path) = &config.provider_path {
        println!("  provider_path:      {}", path.display());
    }
    println!("  provider_timeout:   {}s", config.provider_timeout_secs);

    Ok(())
}
