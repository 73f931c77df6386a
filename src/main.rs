use clipshade::config::{ViewConfig, WINDOW_HEIGHT, WINDOW_WIDTH};
use clipshade::engine::{Engine, SceneObject, SceneState};
use clipshade::object::Object3D;
use clipshade::render::Renderer;
use clipshade::window::{FrameLimiter, Window, WindowEvent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ViewConfig::default().with_viewport(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut engine = Engine::new(config)?;
    let mut state = SceneState::with_builtin_shapes(engine.config().policy);

    if let Some(path) = std::env::args().nth(1) {
        let object = Object3D::from_obj(&path)?.with_policy(engine.config().policy);
        state.push_object(SceneObject::custom(path, object));
    }

    let mut window = Window::new("clipshade", WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut renderer = Renderer::new(window.width(), window.height());
    let mut frame_limiter = FrameLimiter::new(&window);
    let mut commands = Vec::new();

    log::info!(
        "controls: arrows rotate, T/G Y/H U/J translate, +/- scale, R reset, \
         Space auto-rotate, W wireframe, C clip demo, 1-4 or Tab select"
    );

    loop {
        commands.clear();
        match window.poll_events(&mut commands) {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                renderer.resize(w, h);
                engine.resize(w, h);
            }
            WindowEvent::None => {}
        }

        let (next, frame) = engine.step(state, &commands);
        state = next;

        renderer.draw(&frame);
        window.present(renderer.as_bytes())?;
        frame_limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
