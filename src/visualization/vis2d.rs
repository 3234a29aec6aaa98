use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::simulation::particle::ParticleId;
use crate::simulation::scenario::Scenario;

/// Marker tying a rendered circle to its particle id
#[derive(Component)]
struct BodyId(pub ParticleId);

/// Set to true to draw the broad-phase cell lines
const DRAW_GRID: bool = false;

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy 2D viewer with {} particles",
        scenario.universe.len()
    );

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (physics_step_system, sync_transforms_system, grid_overlay_system).chain(),
        )
        .run();
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    // Unit circle scaled per-frame, so a merged particle that grew
    // just changes its transform scale
    let circle = Mesh2dHandle(meshes.add(Circle::new(1.0)));
    let offset = view_offset(&scenario);

    for p in scenario.universe.particles() {
        let color = Color::rgb_u8(p.color.r, p.color.g, p.color.b);
        let radius = p.radius.max(0.02) as f32;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: circle.clone(),
                material: materials.add(ColorMaterial::from(color)),
                transform: Transform::from_xyz(
                    p.pos.x as f32 + offset.x,
                    p.pos.y as f32 + offset.y,
                    0.0,
                )
                .with_scale(Vec3::splat(radius)),
                ..Default::default()
            },
            BodyId(p.id()),
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    let Scenario { universe, dt } = &mut *scenario;
    universe.update(*dt);
}

/// Push simulation state back into the render transforms; despawn
/// circles whose particle was absorbed this frame
fn sync_transforms_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(Entity, &BodyId, &mut Transform, &Handle<ColorMaterial>)>,
) {
    let offset = view_offset(&scenario);

    for (entity, body, mut transform, material) in query.iter_mut() {
        let Some(p) = scenario.universe.particle(body.0) else {
            commands.entity(entity).despawn();
            continue;
        };

        transform.translation.x = p.pos.x as f32 + offset.x;
        transform.translation.y = p.pos.y as f32 + offset.y;
        transform.scale = Vec3::splat(p.radius.max(0.02) as f32);

        if let Some(mat) = materials.get_mut(material) {
            mat.color = Color::rgb_u8(p.color.r, p.color.g, p.color.b);
        }
    }
}

fn grid_overlay_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    if !DRAW_GRID {
        return;
    }

    let grid = scenario.universe.grid();
    let offset = view_offset(&scenario);
    let origin = grid.origin();
    let extents = grid.extents();
    let dims = grid.cell_dims();
    let color = Color::rgba(0.0, 1.0, 0.0, 0.3);

    for r in 0..=grid.rows() {
        let y = (origin.y + r as f64 * dims.y) as f32 + offset.y;
        gizmos.line_2d(
            Vec2::new(origin.x as f32 + offset.x, y),
            Vec2::new(extents.x as f32 + offset.x, y),
            color,
        );
    }
    for c in 0..=grid.cols() {
        let x = (origin.x + c as f64 * dims.x) as f32 + offset.x;
        gizmos.line_2d(
            Vec2::new(x, origin.y as f32 + offset.y),
            Vec2::new(x, extents.y as f32 + offset.y),
            color,
        );
    }
}

/// Shift the simulation rectangle onto the camera at the window center
fn view_offset(scenario: &Scenario) -> Vec2 {
    let grid = scenario.universe.grid();
    let center = (grid.origin() + grid.extents()) / 2.0;
    Vec2::new(-center.x as f32, -center.y as f32)
}
