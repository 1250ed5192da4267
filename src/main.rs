use flycam::{AppConfig, Camera, Vec3, run_with_config};

fn main() {
    // info+ unless RUST_LOG overrides; winit internals stay quiet.
    let default = "info,flycam=debug,winit=warn";
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();

    let config = AppConfig::new().title("flycam").size(800, 600);

    let result = run_with_config(config, |ctx| {
        ctx.camera(Camera::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Y, -90.0, 0.0));
        let lights = ctx.lights_mut();
        lights.offset_all(Vec3::Y);
        if lights.is_empty() {
            log::warn!("no lights configured, Ctrl+movement has nothing to edit");
        }

        let mut since_report = 0.0;

        move |frame| {
            since_report += frame.dt;
            if since_report < 1.0 {
                return;
            }
            since_report = 0.0;

            let camera = &frame.camera;
            log::info!(
                "{:.0} fps | pos {:.2} | yaw {:.1} pitch {:.1} | fov {:.0} | speed {:.1}",
                frame.fps(),
                camera.position(),
                camera.yaw(),
                camera.pitch(),
                camera.field_of_view(),
                camera.movement_speed(),
            );
            if let Some(light) = frame.lights.get(frame.selected_light) {
                log::debug!(
                    "light {} at {:.2} | spotlight {} | wireframe {}",
                    frame.selected_light,
                    light.position,
                    frame.spotlight_on,
                    frame.wireframe,
                );
            }
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
