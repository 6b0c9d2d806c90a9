use aquarelle::{RoundsPolicy, Scene};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/scene_watercolor.json");
    let scene: Scene = serde_json::from_str(s).unwrap();
    scene.validate().unwrap();

    assert_eq!(scene.strokes.len(), 3);
    assert_eq!(scene.brush.rounds, RoundsPolicy::Uniform { min: 2, max: 6 });
}

#[test]
fn json_fixture_survives_a_round_trip() {
    let s = include_str!("data/scene_watercolor.json");
    let scene: Scene = serde_json::from_str(s).unwrap();

    let re = serde_json::to_string(&scene).unwrap();
    let back: Scene = serde_json::from_str(&re).unwrap();
    assert_eq!(back.canvas, scene.canvas);
    assert_eq!(back.background, scene.background);
    assert_eq!(back.seed, scene.seed);
    assert_eq!(back.brush, scene.brush);
    assert_eq!(back.strokes.len(), scene.strokes.len());
}
