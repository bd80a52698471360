//! Loaded images and fonts, keyed the way the card layers look them up.
//!
//! Loading is best effort: every missing or undecodable file is logged and
//! its slot left empty. The layers draw a fallback for any empty slot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::card::Faction;
use crate::font::{FontBook, FontFamily, Weight};
use crate::raster::{LoadedImage, rasterize_svg};

/// Scale at which SVG assets are rasterized, matching the supersampled canvas.
const SVG_ASSET_SCALE: f32 = 3.0;

/// Variant of an hp row icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeartKind {
    Full,
    Armor,
    Empty,
}

impl HeartKind {
    pub const ALL: [HeartKind; 3] = [HeartKind::Full, HeartKind::Armor, HeartKind::Empty];

    /// File name suffix after the faction slug.
    pub fn suffix(self) -> &'static str {
        match self {
            HeartKind::Full => "",
            HeartKind::Armor => "_armor",
            HeartKind::Empty => "_empty",
        }
    }
}

/// Identifies one image slot in an [`AssetStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKey {
    /// Full-card frame.
    Border(Faction),
    /// Skill name badge.
    Badge(Faction),
    /// Hp, armor or empty-hp icon.
    Heart(Faction, HeartKind),
    /// Footer decoration under the skill box.
    Bottom,
}

impl AssetKey {
    /// Path of the asset relative to the asset root, without extension.
    pub fn relative_stem(&self) -> PathBuf {
        match self {
            AssetKey::Border(f) => Path::new("assets/border").join(f.slug()),
            AssetKey::Badge(f) => Path::new("assets/skill").join(f.slug()),
            AssetKey::Heart(f, kind) => {
                Path::new("assets/heart").join(format!("{}{}", f.slug(), kind.suffix()))
            }
            AssetKey::Bottom => Path::new("assets/border").join("bottom"),
        }
    }

    /// Every key the card layers may ask for.
    pub fn all() -> impl Iterator<Item = AssetKey> {
        Faction::ALL
            .into_iter()
            .flat_map(|f| {
                [AssetKey::Border(f), AssetKey::Badge(f)]
                    .into_iter()
                    .chain(HeartKind::ALL.into_iter().map(move |k| AssetKey::Heart(f, k)))
            })
            .chain(std::iter::once(AssetKey::Bottom))
    }
}

/// Images and fonts available to the renderer.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    images: HashMap<AssetKey, LoadedImage>,
    pub fonts: FontBook,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: AssetKey, image: LoadedImage) {
        self.images.insert(key, image);
    }

    /// Inserts a straight-alpha image; empty images are ignored.
    pub fn insert_image(&mut self, key: AssetKey, image: RgbaImage) {
        match LoadedImage::new(image) {
            Some(loaded) => self.insert(key, loaded),
            None => log::warn!("ignoring empty image for {key:?}"),
        }
    }

    pub fn get(&self, key: AssetKey) -> Option<&LoadedImage> {
        self.images.get(&key)
    }

    pub fn border(&self, faction: Faction) -> Option<&LoadedImage> {
        self.get(AssetKey::Border(faction))
    }

    /// Badge for `faction`, falling back to the default faction's badge.
    pub fn badge(&self, faction: Faction) -> Option<&LoadedImage> {
        self.get(AssetKey::Badge(faction))
            .or_else(|| self.get(AssetKey::Badge(Faction::default())))
    }

    pub fn heart(&self, faction: Faction, kind: HeartKind) -> Option<&LoadedImage> {
        self.get(AssetKey::Heart(faction, kind))
    }

    pub fn bottom(&self) -> Option<&LoadedImage> {
        self.get(AssetKey::Bottom)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Loads every known asset under `root`.
    ///
    /// Images are looked up as `<stem>.png`, then `<stem>.svg`. Fonts are
    /// `font/<family>.ttf` or `.otf`, with an optional `-bold` variant.
    /// Nothing here fails; missing files are logged and skipped.
    pub fn load_dir(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let mut store = Self::new();

        for key in AssetKey::all() {
            let stem = root.join(key.relative_stem());
            match load_image(&stem) {
                Some(image) => store.insert(key, image),
                None => log::warn!("missing asset {}", stem.display()),
            }
        }

        for family in FontFamily::ALL {
            for (weight, suffix) in [(Weight::Regular, ""), (Weight::Bold, "-bold")] {
                let stem = root.join("font").join(format!("{}{suffix}", family.file_stem()));
                let Some((path, data)) = read_first(&stem, &["ttf", "otf"]) else {
                    if weight == Weight::Regular {
                        log::warn!("missing font {}", family.name());
                    }
                    continue;
                };
                if let Err(err) = store.fonts.insert_bytes(family, weight, data) {
                    log::warn!("cannot parse font {}: {err}", path.display());
                }
            }
        }

        log::info!(
            "loaded {} images and {:?} from {}",
            store.image_count(),
            store.fonts,
            root.display()
        );
        store
    }
}

fn load_image(stem: &Path) -> Option<LoadedImage> {
    let (path, data) = read_first(stem, &["png", "svg"])?;
    let decoded = if path.extension().is_some_and(|ext| ext == "svg") {
        rasterize_svg(&data, SVG_ASSET_SCALE).and_then(LoadedImage::new)
    } else {
        LoadedImage::decode(&data)
            .map_err(|err| log::warn!("cannot decode {}: {err}", path.display()))
            .ok()
    };
    if decoded.is_none() {
        log::warn!("unusable image {}", path.display());
    }
    decoded
}

/// Reads the first existing `<stem>.<ext>`.
fn read_first(stem: &Path, extensions: &[&str]) -> Option<(PathBuf, Vec<u8>)> {
    extensions.iter().find_map(|ext| {
        let path = stem.with_extension(ext);
        std::fs::read(&path).ok().map(|data| (path, data))
    })
}
