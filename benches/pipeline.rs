use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use clipshade::prelude::*;
use clipshade::render::Renderer;
use clipshade::shading::shade_faces;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn clip_window() -> Rect {
    Rect::from_corners(Vec2::new(200.0, 150.0), Vec2::new(500.0, 400.0))
}

/// Regular n-gon centred on the window's corner so it straddles two edges.
fn ngon(sides: usize) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / sides as f64;
            Vec2::new(200.0 + 150.0 * a.cos(), 150.0 + 150.0 * a.sin())
        })
        .collect()
}

fn benchmark_clipping(c: &mut Criterion) {
    let window = clip_window();
    let mut group = c.benchmark_group("clipping");

    group.bench_function("line_crossing", |b| {
        b.iter(|| {
            clip_line(
                black_box(Vec2::new(50.0, 50.0)),
                black_box(Vec2::new(650.0, 500.0)),
                &window,
            )
        })
    });
    group.bench_function("line_trivial_reject", |b| {
        b.iter(|| {
            clip_line(
                black_box(Vec2::new(0.0, 0.0)),
                black_box(Vec2::new(100.0, 50.0)),
                &window,
            )
        })
    });

    for sides in [5, 32, 256] {
        let polygon = ngon(sides);
        group.bench_with_input(BenchmarkId::new("polygon", sides), &polygon, |b, p| {
            b.iter(|| clip_polygon(black_box(p), &window))
        });
    }
    group.finish();
}

fn benchmark_shading(c: &mut Criterion) {
    let projector = Projector::new(BUFFER_WIDTH, BUFFER_HEIGHT, 5.0, 300.0);
    let light = DirectionalLight::default();
    let palette = Palette::for_shape(ShapeKind::Sphere);
    let mut group = c.benchmark_group("shade_faces");

    for segments in [16, 64] {
        let mut sphere = shapes::sphere(1.0, segments);
        sphere.rotate(0.4, 0.7);
        let vertices = sphere.world_vertices().into_owned();
        group.bench_with_input(
            BenchmarkId::new("sphere", segments),
            &vertices,
            |b, vertices| {
                b.iter(|| shade_faces(black_box(vertices), sphere.faces(), &projector, &light, &palette))
            },
        );
    }
    group.finish();
}

fn benchmark_frame(c: &mut Criterion) {
    let engine = Engine::new(ViewConfig::default()).unwrap();
    let mut group = c.benchmark_group("frame");

    group.bench_function("step_sphere", |b| {
        let mut state = SceneState::with_builtin_shapes(TransformPolicy::RecomputeFromBase);
        let (next, _) = engine.step(state, &[Command::Select(2), Command::ToggleAutoRotate]);
        state = next;
        b.iter(|| {
            let (next, frame) = engine.step(state.clone(), &[]);
            state = next;
            black_box(frame)
        })
    });

    group.bench_function("step_and_draw_cube", |b| {
        let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        let mut state = SceneState::with_builtin_shapes(TransformPolicy::MutateInPlace);
        b.iter(|| {
            let (next, frame) = engine.step(state.clone(), &[Command::Rotate(0.01, 0.02)]);
            state = next;
            renderer.draw(&frame);
            black_box(renderer.as_bytes().len())
        })
    });
    group.finish();
}

criterion_group!(benches, benchmark_clipping, benchmark_shading, benchmark_frame);
criterion_main!(benches);
