use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::PrimaryWindow;

use crate::animation::sampler::FrameSampler;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::Trajectory;

/// Marker for the entity tracking the body's newest trail position
#[derive(Component)]
struct EarthMarker;

/// World-space (AU) -> screen-space scaling factor
const SCALE: f32 = 220.0;

/// Wall-clock seconds per animation frame
const FRAME_INTERVAL: f32 = 0.01;

/// Marker radii [AU]
const SUN_RADIUS: f32 = 0.05;
const EARTH_RADIUS: f32 = 0.03;
const START_RADIUS: f32 = 0.015;

/// Cap on points drawn for the static full-orbit path; the trajectory is
/// strided down to this many so a million-sample run stays drawable
const PATH_POINTS: usize = 4000;

/// Playback state over the finished trajectory. The trajectory itself is
/// immutable; only the frame counter and timer advance.
#[derive(Resource)]
struct Playback {
    trajectory: Trajectory,
    frame: usize,
    timer: Timer,
}

pub fn run_2d(scenario: Scenario, trajectory: Trajectory) {
    println!(
        "run_2d: starting Bevy 2D viewer with {} trajectory samples",
        trajectory.len()
    );

    App::new()
        .insert_resource(Playback {
            trajectory,
            frame: 0,
            timer: Timer::from_seconds(FRAME_INTERVAL, TimerMode::Repeating),
        })
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_markers_system)
        .add_systems(
            Update,
            (advance_frame_system, draw_paths_system, sync_earth_system),
        )
        .run();
}

fn setup_markers_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    // Sun: static yellow marker at the origin
    commands.spawn(MaterialMesh2dBundle {
        mesh: Mesh2dHandle(meshes.add(Circle::new(SUN_RADIUS * SCALE))),
        material: materials.add(ColorMaterial::from(Color::srgb(1.0, 0.85, 0.1))),
        transform: Transform::from_xyz(0.0, 0.0, 1.0),
        ..Default::default()
    });

    // Static marker at the body's initial position
    let x0 = scenario.body.x.x as f32 * SCALE;
    let y0 = scenario.body.x.y as f32 * SCALE;
    commands.spawn(MaterialMesh2dBundle {
        mesh: Mesh2dHandle(meshes.add(Circle::new(START_RADIUS * SCALE))),
        material: materials.add(ColorMaterial::from(Color::srgb(0.5, 0.5, 0.6))),
        transform: Transform::from_xyz(x0, y0, 1.0),
        ..Default::default()
    });

    // Earth: follows the newest point of the trail window
    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(EARTH_RADIUS * SCALE))),
            material: materials.add(ColorMaterial::from(Color::srgb(0.25, 0.5, 1.0))),
            transform: Transform::from_xyz(x0, y0, 2.0),
            ..Default::default()
        },
        EarthMarker,
    ));
}

/// Advance the frame counter at a fixed wall-clock interval, wrapping back
/// to the start after the final frame (the sampler sequence is restartable)
fn advance_frame_system(
    time: Res<Time>,
    scenario: Res<Scenario>,
    mut playback: ResMut<Playback>,
) {
    playback.timer.tick(time.delta());
    let ticks = playback.timer.times_finished_this_tick() as usize;
    if ticks == 0 {
        return;
    }

    let last = playback.trajectory.len() / scenario.animation.speed;
    playback.frame += ticks;
    if playback.frame > last {
        playback.frame = 0;
    }
}

/// Draw the static full-orbit path and the current trail window
fn draw_paths_system(mut gizmos: Gizmos, playback: Res<Playback>, scenario: Res<Scenario>) {
    let traj = &playback.trajectory;

    // Full orbit, strided down for drawing
    let stride = (traj.len() / PATH_POINTS).max(1);
    gizmos.linestrip_2d(
        traj.states
            .iter()
            .step_by(stride)
            .map(|s| Vec2::new(s[0] as f32 * SCALE, s[1] as f32 * SCALE)),
        Color::srgb(0.25, 0.25, 0.3),
    );

    // Trail behind the body
    let sampler = FrameSampler::new(traj, &scenario.animation);
    let frame = sampler.frame(playback.frame);
    gizmos.linestrip_2d(
        frame
            .states
            .iter()
            .map(|s| Vec2::new(s[0] as f32 * SCALE, s[1] as f32 * SCALE)),
        Color::srgb(0.25, 0.5, 1.0),
    );
}

/// Keep the Earth marker on the newest trail point and the frame label in
/// the window title
fn sync_earth_system(
    playback: Res<Playback>,
    scenario: Res<Scenario>,
    mut query: Query<&mut Transform, With<EarthMarker>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let sampler = FrameSampler::new(&playback.trajectory, &scenario.animation);
    let frame = sampler.frame(playback.frame);

    if let Some(newest) = frame.newest() {
        for mut transform in &mut query {
            transform.translation.x = newest[0] as f32 * SCALE;
            transform.translation.y = newest[1] as f32 * SCALE;
        }
    }

    if let Ok(mut window) = windows.get_single_mut() {
        window.title = frame.label;
    }
}
