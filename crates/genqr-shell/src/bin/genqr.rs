use anyhow::Context;
use chrono::Utc;
use genqr_engine::{FontSet, render_async};
use genqr_shell::{LiteralInterpreter, OutputKind, RenderJob, ShellConfig, output_file_name, save_png};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_fonts(config: &ShellConfig) -> anyhow::Result<FontSet> {
    match (&config.font_bold, &config.font_regular) {
        (Some(bold), Some(regular)) => {
            let bold = std::fs::read(bold).with_context(|| format!("reading {}", bold.display()))?;
            let regular = std::fs::read(regular)
                .with_context(|| format!("reading {}", regular.display()))?;
            Ok(FontSet::from_bytes(bold, regular)?)
        }
        _ => Ok(FontSet::load_system()?),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ShellConfig::from_env();
    info!(job = %config.job_path.display(), "Starting genqr");

    let mut job = RenderJob::load(&config.job_path)?;
    if let Some(preset) = &config.preset {
        job.apply_preset(preset)?;
    }
    job.attach_photo();
    job.resolve_prompt(&LiteralInterpreter).await;

    let fonts = load_fonts(&config)?;
    let kind = OutputKind::from(&job.render);
    let image = render_async(job.render, fonts).await?;

    let name = output_file_name(kind, Utc::now());
    let path = save_png(&config.output_dir, &name, &image.png)
        .with_context(|| format!("writing {}", config.output_dir.display()))?;
    info!(path = %path.display(), width = image.width, height = image.height, "Saved image");
    Ok(())
}
