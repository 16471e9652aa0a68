use bevy::app::{AppExit, PluginGroupBuilder};
use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};

use crate::simulation::engine::SimulationLoop;
use crate::simulation::states::NVec2;

/// The simulation as a Bevy resource; the core itself knows nothing of Bevy
#[derive(Resource)]
struct Sim(SimulationLoop);

#[derive(Component)]
struct ParticleIndex(pub usize);

const SCALE: f32 = 1000.0; // unit square -> window pixels

fn to_screen(p: &NVec2) -> Vec2 {
    Vec2::new((p.x as f32 - 0.5) * SCALE, (p.y as f32 - 0.5) * SCALE)
}

fn rgb(c: u32) -> Color {
    Color::srgb_u8((c >> 16) as u8, (c >> 8) as u8, c as u8)
}

/// Open a window and drive `sim` once per frame.
/// `Space` pauses, `R` resets, `Escape` quits.
pub fn run_2d(sim: SimulationLoop) {
    log::info!("run_2d: starting viewer with {} particles", sim.positions().len());

    App::new()
        .insert_resource(Sim(sim))
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(viewer_plugins())
        .add_systems(Startup, setup_particles_system)
        .add_systems(Update, (input_system, physics_step_system, sync_transforms_system, links_system).chain())
        .run();
}

/// Default plugins minus `LogPlugin`: the binary already installed `env_logger`
fn viewer_plugins() -> PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "partsim".into(),
                resolution: (SCALE, SCALE).into(),
                ..default()
            }),
            ..default()
        })
        .disable::<LogPlugin>()
}

fn setup_particles_system(mut commands: Commands, sim: Res<Sim>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());

    let appearance = sim.0.appearance();
    for (i, p) in sim.0.positions().iter().enumerate() {
        let radius = appearance.radii.get(i).copied().unwrap_or(2.0);
        let color = appearance.colors.get(i).copied().unwrap_or(0xffffff);
        let xy = to_screen(p);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius))),
                material: materials.add(ColorMaterial::from(rgb(color))),
                transform: Transform::from_xyz(xy.x, xy.y, 1.0),
                ..default()
            },
            ParticleIndex(i),
        ));
    }
}

fn input_system(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Sim>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        sim.0.reset();
    }
    if keys.just_pressed(KeyCode::Space) {
        sim.0.toggle_paused();
    }
}

fn physics_step_system(mut sim: ResMut<Sim>) {
    if let Err(e) = sim.0.advance_frame() {
        log::error!("{e}");
        sim.0.set_paused(true);
    }
}

fn sync_transforms_system(sim: Res<Sim>, mut query: Query<(&ParticleIndex, &mut Transform)>) {
    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(p) = sim.0.positions().get(*i) {
            let xy = to_screen(p);
            transform.translation.x = xy.x;
            transform.translation.y = xy.y;
        }
    }
}

fn links_system(sim: Res<Sim>, mut gizmos: Gizmos) {
    if let Some(color) = sim.0.appearance().links {
        gizmos.linestrip_2d(sim.0.positions().iter().map(to_screen), rgb(color));
    }
}
