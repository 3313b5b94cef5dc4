use anyhow::Context;
use courselib_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load course library settings")?;
    courselib_telemetry::init(&settings.telemetry)?;

    course_library::app::run(settings).await
}
