// SPDX-License-Identifier: MPL-2.0
//! Gallery importer: turns a folder of photos into catalog entries.
//!
//! For every supported image in the input folder (sorted by name) the
//! importer writes two WebP renditions under the season folder of the asset
//! root and appends one metadata entry to `gallery.json`:
//!
//! ```text
//! <assets>/Images/Gallery/Season<n>/thumbnails/s<n>_image_<k>.webp   300x200
//! <assets>/Images/Gallery/Season<n>/full/s<n>_image_<k>.webp        1200x800
//! ```
//!
//! Both renditions keep the photo's aspect ratio and are centred on a white
//! canvas of the exact target size. Numbering continues after the highest
//! `_image_<k>` id already present in the season.
//!
//! The catalog is edited as a JSON tree so fields this importer does not
//! know about survive the rewrite.

use crate::error::{Error, ImportError, Result};
use crate::media::extensions::GALLERY_EXTENSION;
use crate::media::is_supported_image;
use chrono::NaiveDate;
use image_rs::imageops::{self, FilterType};
use image_rs::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Thumbnail rendition size.
pub const THUMBNAIL_SIZE: (u32, u32) = (300, 200);

/// Full rendition size.
pub const FULL_SIZE: (u32, u32) = (1200, 800);

const CANVAS_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Metadata applied to every imported image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportMetadata {
    /// Alt text; defaults to "Season <n> image <k>" per image.
    pub alt: Option<String>,
    pub caption: String,
    pub match_label: String,
    /// Validated `YYYY-MM-DD` date, or empty.
    pub date: String,
    pub tags: Vec<String>,
    pub players: Vec<String>,
}

/// One import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    pub season: u32,
    pub input: PathBuf,
    pub catalog: PathBuf,
    /// Local copy of the site's `static/` directory.
    pub assets: PathBuf,
    pub metadata: ImportMetadata,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Ids of the entries appended to the catalog.
    pub imported: Vec<String>,
    /// Input files that could not be processed, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Splits a comma-separated CLI list, dropping blanks.
#[must_use]
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validates a `YYYY-MM-DD` date. An empty value is accepted as "no date".
///
/// # Errors
///
/// Returns [`ImportError::InvalidDate`] for anything else.
pub fn validate_date(value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| ImportError::InvalidDate(value.to_string()).into())
}

/// Runs an import.
///
/// # Errors
///
/// Fails before writing anything if the input folder is missing or holds no
/// supported images, if the catalog cannot be read, or if the season does
/// not exist in the catalog. Individual images that fail to convert are
/// reported in [`ImportReport::skipped`] instead.
pub fn run(options: &ImportOptions) -> Result<ImportReport> {
    let sources = collect_sources(&options.input)?;

    let content = fs::read_to_string(&options.catalog)?;
    let mut catalog: Value = serde_json::from_str(&content)?;
    let season_key = options.season.to_string();
    let images = season_images_mut(&mut catalog, &season_key)
        .ok_or_else(|| ImportError::UnknownSeason(season_key.clone()))?;

    let first_number = next_image_number(images);
    let layout = SeasonLayout::new(&options.assets, options.season);
    layout.create_dirs()?;

    tracing::info!(
        season = options.season,
        count = sources.len(),
        output = %layout.season_dir.display(),
        "importing images"
    );

    let mut report = ImportReport::default();
    let mut number = first_number;
    for source in sources {
        let id = format!("s{}_image_{number}", options.season);
        match convert(&source, &layout, &id) {
            Ok(()) => {
                images.push(metadata_entry(&id, number, options, &layout));
                tracing::info!(source = %source.display(), %id, "image imported");
                report.imported.push(id);
                number += 1;
            }
            Err(err) => {
                tracing::warn!(source = %source.display(), error = %err, "image skipped");
                report.skipped.push((source, err.to_string()));
            }
        }
    }

    if !report.imported.is_empty() {
        let mut text = serde_json::to_string_pretty(&catalog)?;
        text.push('\n');
        fs::write(&options.catalog, text)?;
        tracing::info!(path = %options.catalog.display(), "catalog updated");
    }

    Ok(report)
}

/// Supported images directly inside `input`, sorted by path.
fn collect_sources(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Err(ImportError::InputNotFound(input.display().to_string()).into());
    }
    let mut sources: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    if sources.is_empty() {
        return Err(ImportError::NoImages(input.display().to_string()).into());
    }
    sources.sort();
    Ok(sources)
}

/// The season's image list, created if the season exists without one
/// (missing or `null`).
fn season_images_mut<'a>(catalog: &'a mut Value, season_key: &str) -> Option<&'a mut Vec<Value>> {
    let season = catalog.get_mut("seasons")?.get_mut(season_key)?.as_object_mut()?;
    let images = season.entry("images").or_insert(Value::Null);
    if images.is_null() {
        *images = Value::Array(Vec::new());
    }
    images.as_array_mut()
}

/// One past the highest `_image_<k>` number among `images`, or 1.
#[must_use]
pub fn next_image_number(images: &[Value]) -> u32 {
    images
        .iter()
        .filter_map(|img| img.get("id")?.as_str())
        .filter_map(|id| id.split_once("_image_")?.1.parse::<u32>().ok())
        .max()
        .map_or(1, |n| n + 1)
}

struct SeasonLayout {
    season: u32,
    season_dir: PathBuf,
    thumbnails: PathBuf,
    full: PathBuf,
}

impl SeasonLayout {
    fn new(assets: &Path, season: u32) -> Self {
        let season_dir = assets
            .join("Images")
            .join("Gallery")
            .join(format!("Season{season}"));
        Self {
            season,
            thumbnails: season_dir.join("thumbnails"),
            full: season_dir.join("full"),
            season_dir,
        }
    }

    fn create_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.thumbnails)?;
        fs::create_dir_all(&self.full)?;
        Ok(())
    }

    fn address(&self, folder: &str, filename: &str) -> String {
        format!(
            "/static/Images/Gallery/Season{}/{folder}/{filename}",
            self.season
        )
    }
}

fn convert(source: &Path, layout: &SeasonLayout, id: &str) -> Result<()> {
    let img = image_rs::open(source)?;
    let filename = format!("{id}.{GALLERY_EXTENSION}");

    for (size, dir) in [(THUMBNAIL_SIZE, &layout.thumbnails), (FULL_SIZE, &layout.full)] {
        let canvas = fit_on_canvas(&img, size);
        DynamicImage::ImageRgb8(canvas)
            .save_with_format(dir.join(&filename), ImageFormat::WebP)
            .map_err(|e| Error::Image(format!("{}: {e}", source.display())))?;
    }
    Ok(())
}

/// Scales `img` down (never up) to fit `size`, centred on a white canvas.
#[must_use]
pub fn fit_on_canvas(img: &DynamicImage, (width, height): (u32, u32)) -> RgbImage {
    let (w, h) = img.dimensions();
    let fitted = if w > width || h > height {
        img.resize(width, height, FilterType::Lanczos3)
    } else {
        img.clone()
    };
    let fitted = fitted.to_rgb8();

    let mut canvas = RgbImage::from_pixel(width, height, CANVAS_COLOR);
    let x = i64::from((width - fitted.width()) / 2);
    let y = i64::from((height - fitted.height()) / 2);
    imageops::overlay(&mut canvas, &fitted, x, y);
    canvas
}

fn metadata_entry(id: &str, number: u32, options: &ImportOptions, layout: &SeasonLayout) -> Value {
    let filename = format!("{id}.{GALLERY_EXTENSION}");
    let meta = &options.metadata;
    let alt = meta
        .alt
        .clone()
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| format!("Season {} image {number}", options.season));
    json!({
        "id": id,
        "thumbnail": layout.address("thumbnails", &filename),
        "full": layout.address("full", &filename),
        "alt": alt,
        "caption": meta.caption,
        "match": meta.match_label,
        "date": meta.date,
        "tags": meta.tags,
        "players": meta.players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::catalog::Catalog;
    use image_rs::{Rgba, RgbaImage};
    use tempfile::{tempdir, TempDir};

    const CATALOG: &str = r#"{
  "seasons": {
    "6": {
      "images": [
        { "id": "s6_image_3", "full": "/static/x.webp", "alt": "x" },
        { "id": "s6_image_1", "full": "/static/y.webp", "alt": "y" }
      ],
      "champion": "Team Munch"
    }
  }
}"#;

    struct Fixture {
        dir: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempdir().expect("tempdir");
            fs::create_dir_all(dir.path().join("input")).expect("input");
            fs::create_dir_all(dir.path().join("static/data")).expect("data");
            fs::write(dir.path().join("static/data/gallery.json"), CATALOG).expect("catalog");
            Self { dir }
        }

        fn add_photo(&self, name: &str, width: u32, height: u32) {
            RgbaImage::from_pixel(width, height, Rgba([10, 120, 200, 255]))
                .save(self.dir.path().join("input").join(name))
                .expect("photo");
        }

        fn options(&self, season: u32) -> ImportOptions {
            ImportOptions {
                season,
                input: self.dir.path().join("input"),
                catalog: self.dir.path().join("static/data/gallery.json"),
                assets: self.dir.path().join("static"),
                metadata: ImportMetadata {
                    caption: "Championship Game".into(),
                    tags: parse_list("finals, season6,"),
                    ..ImportMetadata::default()
                },
            }
        }
    }

    #[test]
    fn import_numbers_after_highest_existing_id() {
        let fx = Fixture::new();
        fx.add_photo("b.png", 40, 20);
        fx.add_photo("a.png", 20, 40);
        fs::write(fx.dir.path().join("input/notes.txt"), "skip me").expect("txt");

        let report = run(&fx.options(6)).expect("import");
        assert_eq!(report.imported, vec!["s6_image_4", "s6_image_5"]);
        assert!(report.skipped.is_empty());

        let season = fx.dir.path().join("static/Images/Gallery/Season6");
        let thumb = image_rs::open(season.join("thumbnails/s6_image_4.webp")).expect("thumb");
        assert_eq!(thumb.dimensions(), THUMBNAIL_SIZE);
        let full = image_rs::open(season.join("full/s6_image_5.webp")).expect("full");
        assert_eq!(full.dimensions(), FULL_SIZE);
    }

    #[test]
    fn catalog_entries_are_appended_and_loadable() {
        let fx = Fixture::new();
        fx.add_photo("a.png", 30, 30);
        run(&fx.options(6)).expect("import");

        let path = fx.dir.path().join("static/data/gallery.json");
        let text = fs::read_to_string(&path).expect("read");
        let value: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["seasons"]["6"]["champion"], "Team Munch");

        let catalog = Catalog::load(&path).expect("catalog");
        let item = catalog.get(&"s6_image_4".into()).expect("new item");
        assert_eq!(item.full, "/static/Images/Gallery/Season6/full/s6_image_4.webp");
        assert_eq!(
            item.thumbnail.as_deref(),
            Some("/static/Images/Gallery/Season6/thumbnails/s6_image_4.webp")
        );
        assert_eq!(item.alt, "Season 6 image 4");
        assert_eq!(item.caption.as_deref(), Some("Championship Game"));
        assert_eq!(item.tags, vec!["finals", "season6"]);
        assert_eq!(item.date, None);
    }

    #[test]
    fn null_image_list_is_replaced_by_imports() {
        let fx = Fixture::new();
        fs::write(
            fx.dir.path().join("static/data/gallery.json"),
            r#"{ "seasons": { "7": { "images": null } } }"#,
        )
        .expect("catalog");
        fx.add_photo("a.png", 30, 30);

        let report = run(&fx.options(7)).expect("import");
        assert_eq!(report.imported, vec!["s7_image_1"]);
    }

    #[test]
    fn unknown_season_fails_without_touching_catalog() {
        let fx = Fixture::new();
        fx.add_photo("a.png", 10, 10);
        let err = run(&fx.options(9)).unwrap_err();
        assert!(matches!(err, Error::Import(ImportError::UnknownSeason(ref s)) if s == "9"));

        let text = fs::read_to_string(fx.dir.path().join("static/data/gallery.json")).expect("read");
        assert_eq!(text, CATALOG);
        assert!(!fx.dir.path().join("static/Images/Gallery/Season9").exists());
    }

    #[test]
    fn broken_file_is_skipped() {
        let fx = Fixture::new();
        fx.add_photo("a.png", 10, 10);
        fs::write(fx.dir.path().join("input/broken.jpg"), b"not a jpeg").expect("write");

        let report = run(&fx.options(6)).expect("import");
        assert_eq!(report.imported, vec!["s6_image_4"]);
        assert_eq!(report.skipped.len(), 1);
    }

    #[test]
    fn missing_or_empty_input_is_reported() {
        let fx = Fixture::new();
        assert!(matches!(
            run(&fx.options(6)),
            Err(Error::Import(ImportError::NoImages(_)))
        ));

        let mut options = fx.options(6);
        options.input = fx.dir.path().join("nope");
        assert!(matches!(
            run(&options),
            Err(Error::Import(ImportError::InputNotFound(_)))
        ));
    }

    #[test]
    fn next_number_ignores_foreign_ids() {
        let images = vec![
            json!({ "id": "s6_image_7" }),
            json!({ "id": "s6_video_9" }),
            json!({ "id": "s6_image_x" }),
            json!({}),
        ];
        assert_eq!(next_image_number(&images), 8);
        assert_eq!(next_image_number(&[]), 1);
    }

    #[test]
    fn fit_keeps_aspect_and_centres() {
        let wide = DynamicImage::ImageRgba8(RgbaImage::from_pixel(600, 200, Rgba([0, 0, 0, 255])));
        let canvas = fit_on_canvas(&wide, THUMBNAIL_SIZE);
        assert_eq!(canvas.dimensions(), THUMBNAIL_SIZE);
        // 600x200 scales to 300x100, leaving white bands of 50 px.
        assert_eq!(*canvas.get_pixel(150, 10), CANVAS_COLOR);
        assert_eq!(*canvas.get_pixel(150, 100), Rgb([0, 0, 0]));
    }

    #[test]
    fn small_images_are_not_upscaled() {
        let tiny = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255])));
        let canvas = fit_on_canvas(&tiny, THUMBNAIL_SIZE);
        assert_eq!(*canvas.get_pixel(0, 0), CANVAS_COLOR);
        assert_eq!(*canvas.get_pixel(150, 100), Rgb([0, 0, 0]));
    }

    #[test]
    fn date_validation() {
        assert_eq!(validate_date(" 2024-12-15 ").expect("valid"), "2024-12-15");
        assert_eq!(validate_date("").expect("empty"), "");
        assert!(matches!(
            validate_date("15/12/2024"),
            Err(Error::Import(ImportError::InvalidDate(_)))
        ));
    }
}
