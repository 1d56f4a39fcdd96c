//! Level loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable level files.
//! Supports both compressed (brotli) and uncompressed RON files.
//! - Reading: Auto-detects format by checking for valid RON start
//! - Writing: Always uses brotli compression
//!
//! A level file describes the tile grid as rows of ASCII art ('#' solid,
//! '.' or ' ' empty), plus entity spawns, the player start point, and the
//! camera follow settings. [`build_level`] turns a parsed file into a
//! runnable [`Level`] with the standard layer pipeline attached.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game::{
    BackgroundLayer, CameraBounds, CollisionLayer, EntityFactory, EntityLayer,
    EntitySpriteLayer, Level, Stage, TileMap,
};
use crate::math::{Size, Vec2};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of tile rows in a level
    pub const MAX_ROWS: usize = 256;
    /// Maximum number of tile columns in a row
    pub const MAX_COLS: usize = 1024;
    /// Maximum number of entity spawns
    pub const MAX_SPAWNS: usize = 1024;
    /// Maximum string length for level and entity names
    pub const MAX_STRING_LEN: usize = 64;
    /// Maximum coordinate value (prevents overflow issues)
    pub const MAX_COORD: f32 = 1_000_000.0;
}

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    ValidationError(String),
    UnknownEntity(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl From<ron::Error> for LevelError {
    fn from(e: ron::Error) -> Self {
        LevelError::SerializeError(e)
    }
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
            LevelError::UnknownEntity(kind) => write!(f, "Unknown entity kind: {}", kind),
        }
    }
}

impl std::error::Error for LevelError {}

/// Camera follow settings stored in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDef {
    /// Horizontal offset kept between the left viewport edge and the target
    #[serde(default = "default_lead")]
    pub lead: f32,
    /// Stop scrolling at the right edge of the tile grid
    #[serde(default)]
    pub clamp_right: bool,
    /// Follow the target vertically as well as horizontally
    #[serde(default)]
    pub track_y: bool,
}

fn default_lead() -> f32 {
    100.0
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            lead: default_lead(),
            clamp_right: false,
            track_y: false,
        }
    }
}

/// One entity spawn in a level file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDef {
    /// Factory name of the entity to create
    pub kind: String,
    /// World position of the entity's top-left corner
    pub pos: Vec2,
}

/// Serialized form of a level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelFile {
    pub name: String,
    /// Side length of one tile in world units
    pub tile_size: f32,
    /// Downward acceleration applied by gravity traits, in units/s^2
    pub gravity: f32,
    /// Tile grid as ASCII rows: '#' solid, '.' or ' ' empty
    pub rows: Vec<String>,
    #[serde(default)]
    pub spawns: Vec<SpawnDef>,
    pub player_start: Vec2,
    #[serde(default)]
    pub camera: CameraDef,
}

/// A built level plus the pieces the driver wires up itself
pub struct LoadedLevel {
    pub level: Level,
    pub camera_bounds: CameraBounds,
    pub player_start: Vec2,
    pub gravity: f32,
}

/// Check if a float is valid (not NaN or Inf)
fn is_valid_float(f: f32) -> bool {
    f.is_finite() && f.abs() <= limits::MAX_COORD
}

fn validate_vec2(v: Vec2, context: &str) -> Result<(), String> {
    if !is_valid_float(v.x) || !is_valid_float(v.y) {
        return Err(format!("{}: invalid position ({}, {})", context, v.x, v.y));
    }
    Ok(())
}

/// Validate a level file against the limits above
pub fn validate_level(file: &LevelFile) -> Result<(), LevelError> {
    let check = |r: Result<(), String>| r.map_err(LevelError::ValidationError);

    if file.name.is_empty() || file.name.len() > limits::MAX_STRING_LEN {
        return check(Err(format!(
            "level name length {} outside 1..={}",
            file.name.len(),
            limits::MAX_STRING_LEN
        )));
    }
    if !is_valid_float(file.tile_size) || file.tile_size <= 0.0 {
        return check(Err(format!("tile_size must be positive, got {}", file.tile_size)));
    }
    if !is_valid_float(file.gravity) {
        return check(Err(format!("invalid gravity {}", file.gravity)));
    }
    if !is_valid_float(file.camera.lead) {
        return check(Err(format!("invalid camera lead {}", file.camera.lead)));
    }

    if file.rows.is_empty() || file.rows.len() > limits::MAX_ROWS {
        return check(Err(format!(
            "row count {} outside 1..={}",
            file.rows.len(),
            limits::MAX_ROWS
        )));
    }
    for (y, row) in file.rows.iter().enumerate() {
        if row.len() > limits::MAX_COLS {
            return check(Err(format!(
                "row[{}]: {} columns > {}",
                y,
                row.len(),
                limits::MAX_COLS
            )));
        }
        for (x, c) in row.chars().enumerate() {
            if c != '#' && c != '.' && c != ' ' {
                return check(Err(format!("row[{}] col[{}]: unexpected tile '{}'", y, x, c)));
            }
        }
    }

    if file.spawns.len() > limits::MAX_SPAWNS {
        return check(Err(format!(
            "spawn count {} > {}",
            file.spawns.len(),
            limits::MAX_SPAWNS
        )));
    }
    for (i, spawn) in file.spawns.iter().enumerate() {
        if spawn.kind.is_empty() || spawn.kind.len() > limits::MAX_STRING_LEN {
            return check(Err(format!("spawn[{}]: bad entity kind name", i)));
        }
        check(validate_vec2(spawn.pos, &format!("spawn[{}]", i)))?;
    }
    check(validate_vec2(file.player_start, "player_start"))?;

    Ok(())
}

/// Build a runnable level from a parsed file.
///
/// The standard layer pipeline is attached in order: entity update,
/// collision, background, entity sprites. The player itself is not
/// spawned here; the driver inserts it at `player_start` so it can keep
/// the handle for the camera and the controller.
pub fn build_level(
    file: &LevelFile,
    factory: &EntityFactory,
    viewport: Size,
) -> Result<LoadedLevel, LevelError> {
    validate_level(file)?;

    let width = file.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let mut tiles = TileMap::new(width, file.rows.len(), file.tile_size);
    for (y, row) in file.rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                tiles.set_solid(x, y, true);
            }
        }
    }

    let world_width = tiles.world_width();
    let mut stage = Stage::new(tiles);
    for spawn in &file.spawns {
        let mut entity = factory
            .create(&spawn.kind)
            .ok_or_else(|| LevelError::UnknownEntity(spawn.kind.clone()))?;
        entity.state_mut().pos = spawn.pos;
        stage.insert(entity);
    }

    let mut level = Level::new(&file.name, stage);
    level.push_layer(Box::new(EntityLayer));
    level.push_layer(Box::new(CollisionLayer));
    level.push_layer(Box::new(BackgroundLayer::default()));
    level.push_layer(Box::new(EntitySpriteLayer));

    let max_x = if file.camera.clamp_right {
        Some((world_width - viewport.w).max(0.0))
    } else {
        None
    };
    let camera_bounds = CameraBounds {
        lead: file.camera.lead,
        min: Vec2::ZERO,
        max_x,
        track_y: file.camera.track_y,
        max_y: None,
    };

    Ok(LoadedLevel {
        level,
        camera_bounds,
        player_start: file.player_start,
        gravity: file.gravity,
    })
}

/// Load a level file from a RON string (for embedded levels or testing)
pub fn load_level_file_from_str(s: &str) -> Result<LevelFile, LevelError> {
    let file: LevelFile = ron::from_str(s)?;
    validate_level(&file)?;
    Ok(file)
}

/// Load a level file from disk (supports both compressed and uncompressed)
pub fn load_level_file<P: AsRef<Path>>(path: P) -> Result<LevelFile, LevelError> {
    let bytes = fs::read(path.as_ref())?;

    // Detect format: RON files start with '(' or whitespace, brotli is binary
    let is_plain_ron = bytes
        .first()
        .map(|&b| b == b'(' || b == b' ' || b == b'\n' || b == b'\r' || b == b'\t')
        .unwrap_or(false);

    let contents = if is_plain_ron {
        String::from_utf8(bytes).map_err(|e| {
            LevelError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8: {}", e),
            ))
        })?
    } else {
        let mut decompressed = Vec::new();
        brotli::BrotliDecompress(&mut Cursor::new(&bytes), &mut decompressed).map_err(|e| {
            LevelError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("brotli decompression failed: {}", e),
            ))
        })?;
        String::from_utf8(decompressed).map_err(|e| {
            LevelError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid UTF-8 after decompression: {}", e),
            ))
        })?
    };

    let file: LevelFile = ron::from_str(&contents)?;
    validate_level(&file)?;
    Ok(file)
}

/// Save a level file to a compressed RON file (brotli)
pub fn save_level_file<P: AsRef<Path>>(file: &LevelFile, path: P) -> Result<(), LevelError> {
    validate_level(file)?;

    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());
    let ron_string = ron::ser::to_string_pretty(file, config)?;

    // Compress with brotli (quality 6, window 22 - good balance of speed/ratio)
    let mut compressed = Vec::new();
    brotli::BrotliCompress(
        &mut Cursor::new(ron_string.as_bytes()),
        &mut compressed,
        &brotli::enc::BrotliEncoderParams {
            quality: 6,
            lgwin: 22,
            ..Default::default()
        },
    )
    .map_err(|e| {
        LevelError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("brotli compression failed: {}", e),
        ))
    })?;

    fs::write(path, compressed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::traits::{Patrol, Velocity};
    use crate::game::Entity;

    fn sample_file() -> LevelFile {
        LevelFile {
            name: "test".to_string(),
            tile_size: 16.0,
            gravity: 1500.0,
            rows: vec![
                "........".to_string(),
                "...##...".to_string(),
                "########".to_string(),
            ],
            spawns: vec![SpawnDef {
                kind: "walker".to_string(),
                pos: Vec2::new(48.0, 16.0),
            }],
            player_start: Vec2::new(16.0, 0.0),
            camera: CameraDef {
                lead: 100.0,
                clamp_right: true,
                track_y: false,
            },
        }
    }

    fn sample_factory() -> EntityFactory {
        let mut factory = EntityFactory::new();
        factory.register("walker", || {
            let mut e = Entity::new("walker");
            e.state_mut().size = Size::new(16.0, 16.0);
            e.add_trait(Box::new(Velocity));
            e.add_trait(Box::new(Patrol::new(30.0)));
            e
        });
        factory
    }

    #[test]
    fn test_build_level_tiles_and_spawns() {
        let loaded = build_level(&sample_file(), &sample_factory(), Size::new(64.0, 48.0))
            .expect("build failed");

        let tiles = &loaded.level.stage().tiles;
        assert!(tiles.is_solid(0, 2));
        assert!(tiles.is_solid(3, 1));
        assert!(!tiles.is_solid(3, 0));

        assert_eq!(loaded.level.stage().entity_count(), 1);
        let walker = loaded.level.stage().entities().next().expect("no walker");
        assert_eq!(walker.state().kind, "walker");
        assert_eq!(walker.state().pos, Vec2::new(48.0, 16.0));

        assert_eq!(loaded.player_start, Vec2::new(16.0, 0.0));
        assert_eq!(loaded.gravity, 1500.0);
        // 8 tiles * 16.0 wide, 64.0 viewport
        assert_eq!(loaded.camera_bounds.max_x, Some(64.0));
    }

    #[test]
    fn test_build_level_unknown_entity() {
        let mut file = sample_file();
        file.spawns[0].kind = "dragon".to_string();
        let result = build_level(&file, &sample_factory(), Size::new(64.0, 48.0));
        assert!(matches!(result, Err(LevelError::UnknownEntity(k)) if k == "dragon"));
    }

    #[test]
    fn test_validate_rejects_bad_tile_char() {
        let mut file = sample_file();
        file.rows[0] = "..X.....".to_string();
        assert!(matches!(
            validate_level(&file),
            Err(LevelError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nonpositive_tile_size() {
        let mut file = sample_file();
        file.tile_size = 0.0;
        assert!(validate_level(&file).is_err());
        file.tile_size = f32::NAN;
        assert!(validate_level(&file).is_err());
    }

    #[test]
    fn test_validate_rejects_infinite_spawn() {
        let mut file = sample_file();
        file.spawns[0].pos.x = f32::INFINITY;
        assert!(validate_level(&file).is_err());
    }

    #[test]
    fn test_load_from_str_plain_ron() {
        let text = r#####"(
            name: "1-1",
            tile_size: 16.0,
            gravity: 1500.0,
            rows: ["....", "####"],
            player_start: (x: 16.0, y: 0.0),
        )"#####;
        let file = load_level_file_from_str(text).expect("parse failed");
        assert_eq!(file.name, "1-1");
        assert!(file.spawns.is_empty());
        assert_eq!(file.camera.lead, 100.0);
        assert!(!file.camera.clamp_right);
    }

    #[test]
    fn test_save_load_roundtrip_compressed() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("roundtrip.ron.br");

        let file = sample_file();
        save_level_file(&file, &path).expect("save failed");

        // Compressed output must not look like plain RON
        let bytes = fs::read(&path).expect("read failed");
        assert_ne!(bytes.first(), Some(&b'('));

        let loaded = load_level_file(&path).expect("load failed");
        assert_eq!(loaded.name, file.name);
        assert_eq!(loaded.rows, file.rows);
        assert_eq!(loaded.spawns.len(), 1);
        assert_eq!(loaded.player_start, file.player_start);
    }

    #[test]
    fn test_load_plain_ron_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("plain.ron");

        let text = r#####"(
            name: "plain",
            tile_size: 16.0,
            gravity: 1200.0,
            rows: ["#"],
            player_start: (x: 0.0, y: 0.0),
        )"#####;
        fs::write(&path, text).expect("write failed");

        let loaded = load_level_file(&path).expect("load failed");
        assert_eq!(loaded.name, "plain");
        assert_eq!(loaded.gravity, 1200.0);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_level_file("/nonexistent/level.ron");
        assert!(matches!(result, Err(LevelError::IoError(_))));
    }
}
