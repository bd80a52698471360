use image::{Rgba, RgbaImage};
use sgs_card_renderer::{
    AssetKey, AssetStore, CardData, CardRenderer, ComponentId, DetailLevel, Faction, HeartKind,
    Point, PortraitSource, ProjectSnapshot, RenderRequest, SkillDescriptor, SkillType, hit_test,
};

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(rgba))
}

/// Border with a dark 4px rim and a transparent interior.
fn frame_template(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if x < 4 || y < 4 || x >= w - 4 || y >= h - 4 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn synthetic_assets() -> AssetStore {
    let mut assets = AssetStore::new();
    for faction in Faction::ALL {
        assets.insert_image(AssetKey::Border(faction), frame_template(400, 570));
        assets.insert_image(AssetKey::Badge(faction), solid(70, 30, [0, 0, 0, 255]));
        assets.insert_image(AssetKey::Heart(faction, HeartKind::Full), solid(16, 16, [220, 0, 0, 255]));
        assets.insert_image(AssetKey::Heart(faction, HeartKind::Empty), solid(16, 16, [90, 90, 90, 255]));
        assets.insert_image(AssetKey::Heart(faction, HeartKind::Armor), solid(16, 16, [0, 90, 220, 255]));
    }
    assets.insert_image(AssetKey::Bottom, solid(120, 30, [200, 180, 60, 255]));
    assets
}

fn sample_card() -> CardData {
    CardData {
        faction: "魏".into(),
        title: "冰之妖精".into(),
        name: "琪露诺".into(),
        hp: 2,
        max_hp: 4,
        skills: vec![
            SkillDescriptor::new("冻结", SkillType::Locked, "你的手牌上限始终为 [red]9[/red]。"),
            SkillDescriptor::new("天才", SkillType::Normal, "[b]出牌阶段限一次[/b]，你可以摸一张牌。"),
        ],
        flavor: "最强！".into(),
        ..CardData::default()
    }
}

fn png_portrait(rgba: [u8; 4]) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    solid(32, 48, rgba)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[test]
fn full_render_is_supersampled_png() {
    let mut renderer = CardRenderer::new(synthetic_assets());
    let rendered = renderer.render_full(&RenderRequest::new(sample_card())).unwrap();

    assert_eq!(rendered.dimensions(), (1200, 1710));
    assert_eq!(rendered.logical_size(), (400, 570));

    let png = rendered.png.as_ref().unwrap();
    let decoded = image::load_from_memory(png).unwrap().to_rgba8();
    assert_eq!(decoded, rendered.image);
    assert_eq!(rendered.display_image().dimensions(), (400, 570));
}

#[test]
fn identical_inputs_render_identical_pixels() {
    let mut renderer = CardRenderer::new(synthetic_assets()).with_scale(1.0);
    let request = RenderRequest::new(sample_card()).with_portrait(PortraitSource::Bytes(png_portrait([30, 60, 90, 255])));

    let first = renderer.render_full(&request).unwrap();
    let second = renderer.render_full(&request).unwrap();
    assert_eq!(first.image, second.image);
    assert!(!renderer.is_current(first.ticket));
}

#[test]
fn fast_path_matches_full_path_without_shadows() {
    let mut renderer = CardRenderer::new(synthetic_assets()).with_scale(1.0);
    let card = sample_card().resolve().unwrap();

    let fast = renderer.render_fast(&card, None).unwrap();
    let full = renderer.compose(&card, None, DetailLevel::Full).unwrap();
    assert!(fast.png.is_none());
    assert!(full.png.is_some());
    // No fonts are loaded, so no shadowed text exists and the paths agree.
    assert_eq!(fast.image, full.image);
}

#[test]
fn hp_row_and_skill_box_land_where_geometry_says() {
    let mut renderer = CardRenderer::new(synthetic_assets()).with_scale(1.0);
    let card = sample_card().resolve().unwrap();
    let image = renderer.render_fast(&card, None).unwrap().image;

    // First (filled) hp icon at (80, 25), 38 units square.
    let [r, g, b, _] = image.get_pixel(90, 40).0;
    assert!(r > 200 && g < 20 && b < 20);
    // Fourth icon is an empty heart at x = 80 + 3 * 24.7.
    let [r, g, b, _] = image.get_pixel(80 + 75 + 30, 40).0;
    assert!(r.abs_diff(90) < 4 && g.abs_diff(90) < 4 && b.abs_diff(90) < 4);

    let geometry = renderer.geometry(&card);
    let skill_box = geometry.rect_of(ComponentId::SkillBox);
    assert_eq!(skill_box.y + skill_box.height, 570.0);
    // Footer art is centered at the box bottom.
    let [r, g, b, _] = image.get_pixel(232, 560).0;
    assert!(r > 190 && g > 170 && b < 80);
}

#[test]
fn custom_border_recolors_frame_and_badges() {
    let mut renderer = CardRenderer::new(synthetic_assets()).with_scale(1.0);
    let card = CardData {
        enable_custom_border: true,
        border_color: "#81b2d1".into(),
        ..sample_card()
    }
    .resolve()
    .unwrap();
    let image = renderer.render_fast(&card, None).unwrap().image;

    let near = |px: [u8; 4], rgb: [u8; 3]| px.iter().zip(rgb).all(|(a, e)| a.abs_diff(e) <= 3);
    // Frame rim.
    assert!(near(image.get_pixel(1, 300).0, [0x81, 0xb2, 0xd1]));
    // First badge, top-left area clear of the label.
    let column_top = renderer.geometry(&card).skill_column_top() as u32;
    assert!(near(image.get_pixel(17, column_top + 2).0, [0x81, 0xb2, 0xd1]));
    assert_eq!(renderer.cached_recolors(), 2);
}

#[test]
fn rotated_component_hit_test_agrees_with_drawing() {
    let mut renderer = CardRenderer::new(synthetic_assets()).with_scale(1.0);
    let card = CardData {
        layouts: serde_json::json!({ "hp": { "x": 150, "y": 250, "rotation": 90 } }),
        ..sample_card()
    }
    .resolve()
    .unwrap();
    let image = renderer.render_fast(&card, None).unwrap().image;

    let geometry = renderer.geometry(&card);
    let rect = geometry.rect_of(ComponentId::Hp);
    // Local point inside the first icon, mapped to where it is drawn.
    let local = Point::new(150.0 + 10.0 - rect.cx(), 250.0 + 19.0 - rect.cy());
    let drawn = rect.to_canvas(local);

    let [r, g, b, _] = image.get_pixel(drawn.x.round() as u32, drawn.y.round() as u32).0;
    assert!(r > 200 && g < 20 && b < 20);

    let hit = hit_test(&geometry, drawn, None).unwrap();
    assert_eq!(hit.component, ComponentId::Hp);
}

#[test]
fn long_descriptions_shrink_and_grow_the_box() {
    let renderer = CardRenderer::new(AssetStore::new());
    let card = CardData {
        skills: (0..4)
            .map(|i| SkillDescriptor::new(format!("技能{i}"), SkillType::Normal, "字".repeat(200)))
            .collect(),
        ..CardData::default()
    }
    .resolve()
    .unwrap();

    let geometry = renderer.geometry(&card);
    let layout = geometry.skill_layout();
    assert!(layout.tier_index > 0);
    assert!(layout.fits());
    assert!(geometry.skill_box_height() > 80.0);
    assert_eq!(geometry.skill_box_top() + geometry.skill_box_height(), 570.0);
}

#[test]
fn project_snapshot_renders_from_disk() {
    let dir = std::env::temp_dir().join(format!("sgs-card-renderer-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("art")).unwrap();
    std::fs::write(dir.join("art/portrait.png"), png_portrait([0, 200, 0, 255])).unwrap();

    let snapshot = ProjectSnapshot::new(sample_card()).with_art_image("art/portrait.png");
    let project = dir.join("card.json");
    std::fs::write(&project, snapshot.to_json_pretty().unwrap()).unwrap();

    let loaded = ProjectSnapshot::from_path(&project).unwrap();
    assert_eq!(loaded, snapshot);

    let mut renderer = CardRenderer::new(synthetic_assets()).with_scale(1.0);
    let rendered = renderer.render_full(&loaded.render_request(Some(&dir))).unwrap();
    let [r, g, b, _] = rendered.image.get_pixel(200, 300).0;
    assert!(r < 8 && g > 190 && b < 8);

    let missing = ProjectSnapshot::new(sample_card()).with_art_image("art/missing.png");
    assert!(renderer.render_full(&missing.render_request(Some(&dir))).is_err());

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn asset_directory_loads_best_effort() {
    let dir = std::env::temp_dir().join(format!("sgs-card-assets-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets/border")).unwrap();
    solid(40, 57, [0, 0, 0, 255])
        .save(dir.join("assets/border/qun.png"))
        .unwrap();
    std::fs::write(dir.join("assets/border/wei.png"), b"garbage").unwrap();

    let assets = AssetStore::load_dir(&dir);
    assert_eq!(assets.image_count(), 1);
    assert!(assets.border(Faction::Qun).is_some());
    assert!(assets.border(Faction::Wei).is_none());
    assert!(assets.fonts.is_empty());

    std::fs::remove_dir_all(&dir).ok();
}
