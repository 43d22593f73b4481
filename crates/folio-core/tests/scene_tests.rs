// Host-side tests for scene assembly through the recording renderer.

mod common;

use common::*;
use folio_core::scene::{CloudSlot, PointMaterial, Scene, Transform};
use folio_core::settings::{ColorKey, NumericKey};
use folio_core::{Rgb, SettingChange, SettingEffect};
use glam::Vec3;

#[test]
fn initial_scene_has_three_meshes_and_two_clouds() {
    let stage = stage_with(small_config());
    let backend = stage.scene.backend();
    assert_eq!(stage.scene.sections.len(), 3);
    assert_eq!(backend.live_meshes.len(), 3);
    assert_eq!(backend.live_points.len(), 2);
    assert_eq!(stage.scene.cloud(CloudSlot::Field).map(|c| c.len), Some(200));
    assert_eq!(stage.scene.cloud(CloudSlot::Galaxy).map(|c| c.len), Some(300));
    assert!(stage.scene.cloud(CloudSlot::Trail).is_none());
}

#[test]
fn section_meshes_are_laid_out_down_the_page() {
    let stage = stage_with(small_config());
    let positions: Vec<Vec3> = stage
        .scene
        .sections
        .iter()
        .map(|m| m.transform.position)
        .collect();
    assert_eq!(
        positions,
        vec![
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(-2.0, -4.0, 0.0),
            Vec3::new(2.0, -8.0, 0.0),
        ]
    );
}

#[test]
fn regenerating_twice_leaves_one_live_cloud_per_slot() {
    let mut stage = stage_with(small_config());
    stage.regenerate_galaxy().unwrap();
    stage.regenerate_galaxy().unwrap();
    stage.regenerate_field().unwrap();
    let backend = stage.scene.backend();
    assert_eq!(backend.live_points.len(), 2);
    assert_eq!(stage.scene.cloud_count(), 2);
}

#[test]
fn replacement_creates_before_it_releases() {
    let mut scene = Scene::new(RecordingBackend::default(), Rgb::WHITE);
    let material = PointMaterial {
        size: 0.1,
        color: Rgb::WHITE,
        vertex_colors: false,
    };
    let mut buf = folio_core::PointBuffer::default();
    buf.positions = vec![0.0; 9];
    scene.replace_cloud(CloudSlot::Galaxy, &buf, material);
    scene.replace_cloud(CloudSlot::Galaxy, &buf, material);
    assert_eq!(
        scene.backend().calls,
        vec![
            Call::CreatePoints { id: 1, len: 3 },
            Call::CreatePoints { id: 2, len: 3 },
            Call::ReleasePoints(1),
        ]
    );
}

#[test]
fn galaxy_setting_regenerates_with_new_count() {
    let mut stage = stage_with(small_config());
    let effect = stage
        .apply_setting(SettingChange::Numeric(NumericKey::GalaxyCount, 4200.0))
        .unwrap();
    assert_eq!(effect, SettingEffect::RegenerateGalaxy);
    assert_eq!(stage.scene.cloud(CloudSlot::Galaxy).map(|c| c.len), Some(4000));
    assert_eq!(stage.scene.backend().live_points.len(), 2);
}

#[test]
fn field_count_setting_regenerates_the_field() {
    let mut stage = stage_with(small_config());
    let effect = stage
        .apply_setting(SettingChange::Numeric(NumericKey::FieldCount, 3000.0))
        .unwrap();
    assert_eq!(effect, SettingEffect::RegenerateField);
    assert_eq!(stage.scene.cloud(CloudSlot::Field).map(|c| c.len), Some(3000));
}

#[test]
fn material_color_recolors_without_regenerating() {
    let mut stage = stage_with(small_config());
    let creates_before = stage.scene.backend().calls.len();
    let teal = Rgb::from_u32(0x00ffcc);
    let effect = stage
        .apply_setting(SettingChange::Color(ColorKey::Material, teal))
        .unwrap();
    assert_eq!(effect, SettingEffect::Recolor);
    assert_eq!(stage.scene.backend().calls.len(), creates_before);
    assert_eq!(stage.scene.material_color, teal);
    assert_eq!(stage.scene.cloud(CloudSlot::Field).map(|c| c.material.color), Some(teal));
    // galaxy keeps its vertex colors
    assert_eq!(
        stage.scene.cloud(CloudSlot::Galaxy).map(|c| c.material.color),
        Some(Rgb::WHITE)
    );
}

#[test]
fn companion_replacement_releases_the_old_mesh() {
    let mut scene = Scene::new(RecordingBackend::default(), Rgb::WHITE);
    let mesh = folio_core::geometry::octahedron(1.0);
    scene.set_companion(&mesh, Transform::at(Vec3::ZERO));
    scene.set_companion(&mesh, Transform::at(Vec3::ONE));
    assert_eq!(scene.backend().live_meshes.len(), 1);
    assert_eq!(scene.companion.as_ref().map(|c| c.handle.0), Some(2));
}

#[test]
fn render_skips_hidden_meshes_and_empty_clouds() {
    let mut stage = stage_with(small_config());
    stage.scene.sections[1].visible = false;
    stage.frame_at(0.0).unwrap();
    let frame = stage.scene.backend().last_frame();
    assert_eq!(frame.meshes.len(), 2);
    assert_eq!(frame.points.len(), 2);
}
