//! GPU round-trip tests for the picking pass.
//!
//! Each test skips when no adapter is available.

use std::sync::Arc;

use arm_core::{
    BuiltinMeshSource, ColorVariant, Geometry, JointState, KinematicChain, MeshError, MeshSource,
    NoInput, PartId, PickResult,
};
use arm_renderer::{
    ArmScene, MeshRegistry, PickingPass, RenderContext, RenderError, RenderObject, Renderer,
    RendererConfig,
};
use glam::{Mat4, UVec2, Vec2, Vec3};

const SIZE: u32 = 64;

fn gpu() -> Option<(Arc<wgpu::Device>, Arc<wgpu::Queue>)> {
    let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        force_fallback_adapter: false,
        compatible_surface: None,
    }))?;
    let (device, queue) = pollster::block_on(adapter.request_device(
        &wgpu::DeviceDescriptor {
            label: Some("picking test device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                .using_resolution(adapter.limits()),
            memory_hints: wgpu::MemoryHints::default(),
        },
        None,
    ))
    .ok()?;
    Some((Arc::new(device), Arc::new(queue)))
}

fn context() -> Option<RenderContext> {
    let Some((device, queue)) = gpu() else {
        eprintln!("no wgpu adapter available, skipping");
        return None;
    };
    Some(RenderContext::new(
        device,
        queue,
        wgpu::TextureFormat::Rgba8Unorm,
        SIZE,
        SIZE,
    ))
}

/// Screen-space quads for three parts, nothing for the rest
struct QuadSource;

impl QuadSource {
    fn center_x(part: PartId) -> Option<f32> {
        match part {
            PartId::Base => Some(-0.6),
            PartId::Top => Some(0.0),
            PartId::Arm1 => Some(0.6),
            _ => None,
        }
    }
}

impl MeshSource for QuadSource {
    fn load(&self, part: PartId) -> Result<Geometry, MeshError> {
        let x = Self::center_x(part).ok_or(MeshError::EmptyMesh)?;
        let h = 0.2;
        Ok(Geometry {
            positions: vec![
                [x - h, -h, 0.5],
                [x + h, -h, 0.5],
                [x + h, h, 0.5],
                [x - h, h, 0.5],
            ],
            normals: Vec::new(),
            indices: vec![0, 1, 2, 0, 2, 3],
        })
    }
}

fn quad_scene() -> ArmScene {
    let mut scene = ArmScene::new();
    for part in PartId::ALL {
        scene.push(RenderObject::new(part, Mat4::IDENTITY));
    }
    scene
}

#[test]
fn test_quads_decode_to_their_parts() {
    let Some(ctx) = context() else {
        return;
    };
    let mut meshes = MeshRegistry::new(Box::new(QuadSource));
    meshes.load_all(&ctx).unwrap();
    let mut picking = PickingPass::new(&ctx, PartId::COUNT, UVec2::splat(SIZE)).unwrap();
    let scene = quad_scene();

    let cases = [
        (Vec2::new(12.8, 32.0), PickResult::Part(PartId::Base)),
        (Vec2::new(32.5, 32.5), PickResult::Part(PartId::Top)),
        (Vec2::new(51.2, 32.0), PickResult::Part(PartId::Arm1)),
        (Vec2::new(32.0, 5.0), PickResult::Background),
    ];
    for (cursor, expected) in cases {
        let sample = picking
            .sample(&ctx, &meshes, &scene, Mat4::IDENTITY, cursor)
            .unwrap();
        assert_eq!(sample.map(PickResult::decode), Some(expected), "{cursor}");
    }
}

#[test]
fn test_out_of_bounds_cursor_skips_gpu_work() {
    let Some(ctx) = context() else {
        return;
    };
    let mut meshes = MeshRegistry::new(Box::new(QuadSource));
    meshes.load_all(&ctx).unwrap();
    let mut picking = PickingPass::new(&ctx, PartId::COUNT, UVec2::splat(SIZE)).unwrap();
    let scene = quad_scene();

    for cursor in [Vec2::new(-1.0, 10.0), Vec2::new(10.0, SIZE as f32), Vec2::splat(500.0)] {
        let sample = picking
            .sample(&ctx, &meshes, &scene, Mat4::IDENTITY, cursor)
            .unwrap();
        assert_eq!(sample, None);
    }
}

#[test]
fn test_registry_empty_meshes_and_fallback() {
    let Some(ctx) = context() else {
        return;
    };
    let mut meshes = MeshRegistry::new(Box::new(QuadSource));
    meshes.load_all(&ctx).unwrap();

    // Failed loads become empty meshes that draw nothing
    let pen = meshes.get(PartId::Pen, ColorVariant::Standard).unwrap();
    assert!(pen.is_empty());
    assert!(pen.vertex_buffer.is_none());

    let base = meshes.get(PartId::Base, ColorVariant::Highlighted).unwrap();
    assert!(base.is_indexed());
    assert_eq!(base.index_count, 6);

    // No highlighted joint mesh exists; the lookup falls back to standard
    assert_eq!(
        meshes.handle(PartId::Joint, ColorVariant::Highlighted),
        meshes.handle(PartId::Joint, ColorVariant::Standard)
    );
    assert_ne!(
        meshes.handle(PartId::Top, ColorVariant::Highlighted),
        meshes.handle(PartId::Top, ColorVariant::Standard)
    );
}

#[test]
fn test_invalid_shader_is_reported() {
    let Some(ctx) = context() else {
        return;
    };
    let result = ctx.create_shader("fn vs_main( {", "broken");
    assert!(matches!(result, Err(RenderError::Shader { .. })));
}

#[test]
fn test_renderer_picks_base_and_background() {
    let Some((device, queue)) = gpu() else {
        eprintln!("no wgpu adapter available, skipping");
        return;
    };
    let format = wgpu::TextureFormat::Rgba8Unorm;
    let size = 128;
    let mut renderer = Renderer::new(
        device.clone(),
        queue,
        format,
        size,
        size,
        RendererConfig::default(),
        Box::new(BuiltinMeshSource),
    )
    .unwrap();

    let mut joints = JointState::new();
    let transforms = KinematicChain::robot_arm().evaluate(&mut joints, &mut NoInput);
    let scene = ArmScene::from_pose(&transforms, &joints);

    let target = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("test target"),
        size: wgpu::Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = target.create_view(&wgpu::TextureViewDescriptor::default());
    renderer.render(&scene, &view);

    // Project the middle of the base into the viewport
    let clip = renderer.camera().view_proj() * Vec3::new(0.0, 0.5, 0.0).extend(1.0);
    let ndc = clip.truncate() / clip.w;
    let cursor = Vec2::new(
        (ndc.x + 1.0) * 0.5 * size as f32,
        (1.0 - ndc.y) * 0.5 * size as f32,
    );

    let hit = renderer.pick(&scene, cursor).map(PickResult::decode);
    assert_eq!(hit, Some(PickResult::Part(PartId::Base)));

    let corner = renderer.pick(&scene, Vec2::new(0.5, 0.5)).map(PickResult::decode);
    assert_eq!(corner, Some(PickResult::Background));

    assert_eq!(renderer.pick(&scene, Vec2::new(-3.0, 0.0)), None);
    assert_eq!(joints, JointState::new());
}
