/// External configuration loader plus fixed engine constants.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Fixed constants (not configurable) ──

pub const SCREEN_WIDTH: i32 = 880;
pub const SCREEN_HEIGHT: i32 = 1080;

/// Side length of one maze cell in world pixels.
pub const CELL_SIZE: f32 = 32.0;
/// World position of the maze's top-left grid corner.
pub const MAZE_OFFSET_X: f32 = 48.0;
pub const MAZE_OFFSET_Y: f32 = 120.0;

/// An entity within this distance of a cell center (per axis) counts as
/// centered and may change heading.
pub const CENTER_TOLERANCE: f32 = 3.0;

/// Downward acceleration applied to effect particles, px/s².
pub const PARTICLE_GRAVITY: f32 = 100.0;

/// Mouth animation advance rate while moving, degrees per second.
pub const MOUTH_RATE: f32 = 450.0;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub rules: RulesConfig,
    pub display: DisplayConfig,
    /// Reserved for a future high-score table. Never read or written.
    #[allow(dead_code)]
    pub high_score_file: PathBuf,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub player: f32,
    pub ghost: f32,
    /// Reserved: frightened mode is not wired into any reachable behavior.
    #[allow(dead_code)]
    pub ghost_frightened: f32,
}

#[derive(Clone, Debug)]
pub struct RulesConfig {
    pub power_pellet_duration: f32,
    pub invulnerability_duration: f32,
    pub starting_lives: u32,
}

#[derive(Clone, Debug)]
pub struct DisplayConfig {
    pub target_fps: u32,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    rules: TomlRules,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_player_speed")]
    player: f32,
    #[serde(default = "default_ghost_speed")]
    ghost: f32,
    #[serde(default = "default_ghost_frightened_speed")]
    ghost_frightened: f32,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_power_duration")]
    power_pellet_duration: f32,
    #[serde(default = "default_invuln_duration")]
    invulnerability_duration: f32,
    #[serde(default = "default_starting_lives")]
    starting_lives: u32,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_target_fps")]
    target_fps: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_high_score_file")]
    high_score_file: String,
}

// ── Defaults ──

fn default_player_speed() -> f32 { 160.0 }
fn default_ghost_speed() -> f32 { 140.0 }
fn default_ghost_frightened_speed() -> f32 { 80.0 }
fn default_power_duration() -> f32 { 8.0 }
fn default_invuln_duration() -> f32 { 3.0 }
fn default_starting_lives() -> u32 { 3 }
fn default_target_fps() -> u32 { 60 }
fn default_high_score_file() -> String { "chomper_highscore.dat".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            player: default_player_speed(),
            ghost: default_ghost_speed(),
            ghost_frightened: default_ghost_frightened_speed(),
        }
    }
}

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            power_pellet_duration: default_power_duration(),
            invulnerability_duration: default_invuln_duration(),
            starting_lives: default_starting_lives(),
        }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { target_fps: default_target_fps() }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { high_score_file: default_high_score_file() }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig::from_toml(toml_cfg)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig {
                player: toml_cfg.speed.player,
                ghost: toml_cfg.speed.ghost,
                ghost_frightened: toml_cfg.speed.ghost_frightened,
            },
            rules: RulesConfig {
                power_pellet_duration: toml_cfg.rules.power_pellet_duration,
                invulnerability_duration: toml_cfg.rules.invulnerability_duration,
                starting_lives: toml_cfg.rules.starting_lives,
            },
            display: DisplayConfig {
                target_fps: toml_cfg.display.target_fps,
            },
            high_score_file: PathBuf::from(toml_cfg.general.high_score_file),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
