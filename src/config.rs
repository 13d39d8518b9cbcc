//! Scene configuration and the named presets
//!
//! Every numeric knob of the particle field and the circuit diagram lives
//! here. Configurations deserialize from YAML or JSON with `#[serde(default)]`
//! on every struct, so a document only has to name the values it changes.
//! Overrides can also be layered on top of a preset with
//! [`SceneConfig::with_overrides`].

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::color::{Rgba, palette};
use crate::error::{ConfigError, ConfigResult};

/// Names accepted by [`FieldConfig::preset`]
pub const FIELD_PRESETS: &[&str] = &["quantum", "hero", "ambient"];

/// A half-open range `[min, max)` that random values are drawn from
///
/// Serialized as a two-element array. A span with `min == max` always
/// yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range symmetric around zero: `[-half, half)`
    pub const fn symmetric(half: f64) -> Self {
        Self::new(-half, half)
    }

    /// Draw a value from the span
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && (value < self.max || value == self.min)
    }

    fn check(&self, field: &str) -> ConfigResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::invalid(field, "bounds must be finite"));
        }
        if !(self.max - self.min).is_finite() {
            return Err(ConfigError::invalid(field, "width of the range overflows"));
        }
        if self.min > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("min {} is greater than max {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

impl From<[f64; 2]> for Span {
    fn from([min, max]: [f64; 2]) -> Self {
        Self::new(min, max)
    }
}

impl From<Span> for [f64; 2] {
    fn from(span: Span) -> Self {
        [span.min, span.max]
    }
}

/// Direction of the pointer force applied to nearby particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerForce {
    /// Push particles away from the pointer
    #[default]
    Repel,
    /// Pull particles toward the pointer
    Attract,
}

/// How waves are painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveStyle {
    /// Thin stroked circle
    Ring,
    /// Filled radial gradient fading to transparent at the rim
    Glow,
}

/// What happens to the previous frame before drawing the next one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Backdrop {
    /// Hard clear to transparent
    Clear,
    /// Low-alpha fill over the whole surface, leaving motion smears
    Fade { color: Rgba, alpha: f64 },
}

/// Particle trail settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Maximum stored positions per particle (0 disables trails)
    pub cap: usize,
    /// Opacity multiplier applied to the newest trail dot
    pub opacity: f64,
    /// Trail dot radius relative to the particle radius
    pub scale: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            cap: 10,
            opacity: 0.5,
            scale: 0.5,
        }
    }
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub force: PointerForce,
    /// Particles closer than this to the pointer feel the force
    pub radius: f64,
    /// Velocity change per frame at zero distance
    pub strength: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            force: PointerForce::Repel,
            radius: 100.0,
            strength: 0.05,
        }
    }
}

/// Click burst settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    /// Particles spawned per click, on evenly spaced angles
    pub count: usize,
    pub speed: Span,
    pub radius: Span,
    pub opacity: Span,
    /// Opacity lost per frame; burst particles retire once invisible
    pub fade: f64,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 20,
            speed: Span::new(2.0, 7.0),
            radius: Span::new(1.0, 3.0),
            opacity: Span::new(0.2, 1.0),
            fade: 0.01,
        }
    }
}

/// Wave emitter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Probability that a pointer move emits a wave
    pub chance: f64,
    pub max_radius: Span,
    /// Radius gained per frame
    pub speed: Span,
    /// Opacity at spawn
    pub opacity: f64,
    /// Opacity lost per frame
    pub fade: f64,
    pub style: WaveStyle,
    pub palette: Vec<Rgba>,
    /// Stroke width for [`WaveStyle::Ring`]
    pub line_width: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            chance: 0.1,
            max_radius: Span::new(100.0, 300.0),
            speed: Span::new(2.0, 5.0),
            opacity: 0.6,
            fade: 0.02,
            style: WaveStyle::Ring,
            palette: vec![palette::INDIGO],
            line_width: 2.0,
        }
    }
}

/// Connection lines between nearby particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Pairs closer than this are connected
    pub distance: f64,
    /// Line opacity for coincident particles, falling to 0 at `distance`
    pub opacity: f64,
    pub color: Rgba,
    pub width: f64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            distance: 150.0,
            opacity: 0.3,
            color: palette::INDIGO,
            width: 1.0,
        }
    }
}

/// Configuration for a [`ParticleField`](crate::field::ParticleField)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Resting population; bursts exceed it temporarily
    pub target_count: usize,
    pub palette: Vec<Rgba>,
    pub radius: Span,
    /// Range for each initial velocity component
    pub speed: Span,
    pub opacity: Span,
    /// Velocity multiplier applied every frame
    pub damping: f64,
    /// Distance beyond the bounds at which surplus particles are retired
    ///
    /// Integrated particles are clamped inside the bounds; this only applies
    /// to particles that end up outside them some other way.
    pub retire_margin: f64,
    /// Whether pointer moves and clicks affect the field
    pub interactive: bool,
    /// Glow radius relative to particle radius (0 disables the glow)
    pub glow_scale: f64,
    /// Draw cores fully opaque instead of at the particle's opacity
    pub solid_core: bool,
    pub backdrop: Backdrop,
    pub trail: TrailConfig,
    pub pointer: PointerConfig,
    pub burst: BurstConfig,
    pub waves: WaveConfig,
    pub links: LinkConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::quantum()
    }
}

impl FieldConfig {
    /// Section background: indigo rings, repelling pointer, short trails
    pub fn quantum() -> Self {
        Self {
            target_count: 100,
            palette: vec![
                palette::INDIGO,
                palette::VIOLET,
                palette::PINK,
                palette::EMERALD,
                palette::AMBER,
            ],
            radius: Span::new(1.0, 4.0),
            speed: Span::symmetric(0.25),
            opacity: Span::new(0.2, 0.7),
            damping: 0.99,
            retire_margin: 50.0,
            interactive: true,
            glow_scale: 3.0,
            solid_core: true,
            backdrop: Backdrop::Fade {
                color: palette::BLACK,
                alpha: 0.05,
            },
            trail: TrailConfig::default(),
            pointer: PointerConfig::default(),
            burst: BurstConfig::default(),
            waves: WaveConfig::default(),
            links: LinkConfig::default(),
        }
    }

    /// Hero banner: denser, faster, glowing waves and white links
    pub fn hero() -> Self {
        Self {
            target_count: 150,
            palette: vec![
                palette::WHITE,
                palette::INDIGO,
                palette::VIOLET,
                palette::PINK,
                palette::EMERALD,
                palette::AMBER,
            ],
            speed: Span::symmetric(0.4),
            opacity: Span::new(0.2, 0.8),
            damping: 0.98,
            retire_margin: 100.0,
            glow_scale: 4.0,
            trail: TrailConfig {
                cap: 15,
                opacity: 0.4,
                scale: 0.6,
            },
            pointer: PointerConfig {
                radius: 150.0,
                strength: 0.08,
                ..PointerConfig::default()
            },
            burst: BurstConfig {
                count: 30,
                speed: Span::new(4.0, 12.0),
                radius: Span::new(1.0, 4.0),
                opacity: Span::new(0.1, 1.0),
                fade: 0.008,
            },
            waves: WaveConfig {
                chance: 0.05,
                max_radius: Span::new(200.0, 500.0),
                speed: Span::new(3.0, 7.0),
                opacity: 0.8,
                fade: 0.015,
                style: WaveStyle::Glow,
                palette: vec![palette::WHITE, palette::INDIGO, palette::VIOLET],
                line_width: 2.0,
            },
            links: LinkConfig {
                distance: 120.0,
                opacity: 0.4,
                color: palette::WHITE,
                width: 1.5,
            },
            ..Self::quantum()
        }
    }

    /// Floating backdrop: sparse white dots and faint links, no interaction
    pub fn ambient() -> Self {
        Self {
            target_count: 50,
            palette: vec![palette::WHITE],
            damping: 1.0,
            interactive: false,
            glow_scale: 0.0,
            solid_core: false,
            backdrop: Backdrop::Clear,
            trail: TrailConfig {
                cap: 0,
                ..TrailConfig::default()
            },
            burst: BurstConfig {
                count: 0,
                ..BurstConfig::default()
            },
            waves: WaveConfig {
                chance: 0.0,
                ..WaveConfig::default()
            },
            links: LinkConfig {
                distance: 100.0,
                opacity: 0.1,
                color: palette::WHITE,
                width: 0.5,
            },
            ..Self::quantum()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> ConfigResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "quantum" => Ok(Self::quantum()),
            "hero" => Ok(Self::hero()),
            "ambient" => Ok(Self::ambient()),
            _ => Err(ConfigError::UnknownPreset(name.to_string())),
        }
    }
}

/// Configuration for a [`CircuitDiagram`](crate::circuit::CircuitDiagram)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    /// Number of horizontal tracks (qubit lines)
    pub tracks: usize,
    /// Gate draws per generated sequence
    pub gate_count: usize,
    /// Probability that a draw is a dual-track gate
    pub dual_chance: f64,
    /// Time added after each draw
    pub time_step: Span,
    /// Extra time after the last gate before the sweep wraps
    pub tail: f64,
    /// Sweep advance per frame
    pub sweep_rate: f64,
    /// Inset of the diagram from the surface edges
    pub padding: f64,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            tracks: 5,
            gate_count: 30,
            dual_chance: 0.3,
            time_step: Span::new(1.0, 3.0),
            tail: 5.0,
            sweep_rate: 0.1,
            padding: 40.0,
        }
    }
}

/// Common loading and validation for scene configurations
pub trait SceneConfig: Sized + Serialize + DeserializeOwned {
    /// Reject values the scene cannot work with
    fn validate(&self) -> ConfigResult<()>;

    /// Parse and validate a YAML document (JSON is accepted too)
    fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document
    fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Layer a partial YAML/JSON document over this configuration
    ///
    /// Mappings merge key by key; any other value replaces the original.
    fn with_overrides(&self, overrides: &str) -> ConfigResult<Self> {
        let mut base = serde_yaml::to_value(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let patch: Value =
            serde_yaml::from_str(overrides).map_err(|e| ConfigError::Parse(e.to_string()))?;
        merge_values(&mut base, patch);

        let config: Self =
            serde_yaml::from_value(base).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as YAML
    fn to_yaml_string(&self) -> ConfigResult<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn merge_values(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Mapping(base), Value::Mapping(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        // An empty document leaves everything untouched
        (_, Value::Null) => {}
        (base, patch) => *base = patch,
    }
}

fn check_unit(field: &str, value: f64) -> ConfigResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> ConfigResult<()> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(ConfigError::invalid(field, format!("{value} must be >= 0")));
    }
    Ok(())
}

fn check_palette(field: &str, colors: &[Rgba]) -> ConfigResult<()> {
    if colors.is_empty() {
        return Err(ConfigError::invalid(field, "palette must not be empty"));
    }
    Ok(())
}

fn check_radius_span(field: &str, span: &Span) -> ConfigResult<()> {
    span.check(field)?;
    if span.min <= 0.0 {
        return Err(ConfigError::invalid(field, "radius must be > 0"));
    }
    Ok(())
}

fn check_opacity_span(field: &str, span: &Span) -> ConfigResult<()> {
    span.check(field)?;
    check_unit(field, span.min)?;
    check_unit(field, span.max)
}

impl SceneConfig for FieldConfig {
    fn validate(&self) -> ConfigResult<()> {
        check_palette("palette", &self.palette)?;
        check_radius_span("radius", &self.radius)?;
        self.speed.check("speed")?;
        check_opacity_span("opacity", &self.opacity)?;

        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::invalid("damping", "must be in (0, 1]"));
        }
        check_non_negative("retire_margin", self.retire_margin)?;
        check_non_negative("glow_scale", self.glow_scale)?;

        if let Backdrop::Fade { alpha, .. } = self.backdrop {
            check_unit("backdrop.alpha", alpha)?;
        }

        check_unit("trail.opacity", self.trail.opacity)?;
        check_non_negative("trail.scale", self.trail.scale)?;

        check_non_negative("pointer.radius", self.pointer.radius)?;
        check_non_negative("pointer.strength", self.pointer.strength)?;

        self.burst.speed.check("burst.speed")?;
        check_radius_span("burst.radius", &self.burst.radius)?;
        check_opacity_span("burst.opacity", &self.burst.opacity)?;
        check_unit("burst.fade", self.burst.fade)?;
        if self.burst.count > 0 && self.burst.fade <= 0.0 {
            return Err(ConfigError::invalid(
                "burst.fade",
                "burst particles must fade (fade > 0) to be retired",
            ));
        }

        check_unit("waves.chance", self.waves.chance)?;
        self.waves.max_radius.check("waves.max_radius")?;
        self.waves.speed.check("waves.speed")?;
        if self.waves.speed.min <= 0.0 {
            return Err(ConfigError::invalid("waves.speed", "waves must grow (speed > 0)"));
        }
        check_unit("waves.opacity", self.waves.opacity)?;
        check_unit("waves.fade", self.waves.fade)?;
        check_palette("waves.palette", &self.waves.palette)?;
        check_non_negative("waves.line_width", self.waves.line_width)?;

        check_non_negative("links.distance", self.links.distance)?;
        check_unit("links.opacity", self.links.opacity)?;
        check_non_negative("links.width", self.links.width)?;

        Ok(())
    }
}

impl SceneConfig for CircuitConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.tracks == 0 {
            return Err(ConfigError::invalid("tracks", "at least one track is required"));
        }
        check_unit("dual_chance", self.dual_chance)?;
        self.time_step.check("time_step")?;
        if self.time_step.min <= 0.0 {
            return Err(ConfigError::invalid(
                "time_step",
                "steps must be > 0 so gate times strictly increase",
            ));
        }
        check_non_negative("tail", self.tail)?;
        check_non_negative("sweep_rate", self.sweep_rate)?;
        check_non_negative("padding", self.padding)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn all_presets_validate() {
        for name in FIELD_PRESETS {
            let config = FieldConfig::preset(name).unwrap();
            config.validate().unwrap_or_else(|e| panic!("{name}: {e}"));
        }
        CircuitConfig::default().validate().unwrap();
    }

    #[test]
    fn unknown_preset_is_an_error() {
        match FieldConfig::preset("disco") {
            Err(ConfigError::UnknownPreset(name)) => assert_eq!(name, "disco"),
            other => panic!("Expected UnknownPreset, got {other:?}"),
        }
    }

    #[test]
    fn preset_lookup_ignores_case() {
        assert_eq!(FieldConfig::preset("HERO").unwrap(), FieldConfig::hero());
    }

    #[test]
    fn span_sampling_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let span = Span::new(1.0, 4.0);
        for _ in 0..1000 {
            let v = span.sample(&mut rng);
            assert!(span.contains(v), "{v} escaped {span:?}");
        }
    }

    #[test]
    fn degenerate_span_is_constant() {
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(Span::new(2.5, 2.5).sample(&mut rng), 2.5);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = FieldConfig::from_yaml_str("target_count: 12\ntrail:\n  cap: 3\n").unwrap();
        assert_eq!(config.target_count, 12);
        assert_eq!(config.trail.cap, 3);
        assert_eq!(config.trail.opacity, TrailConfig::default().opacity);
        assert_eq!(config.links, LinkConfig::default());
    }

    #[test]
    fn spans_and_colors_parse_from_yaml() {
        let config = FieldConfig::from_yaml_str(
            "radius: [2.0, 5.0]\npalette: ['#ffffff', '#10b981']\nbackdrop:\n  mode: clear\n",
        )
        .unwrap();
        assert_eq!(config.radius, Span::new(2.0, 5.0));
        assert_eq!(config.palette, vec![palette::WHITE, palette::EMERALD]);
        assert_eq!(config.backdrop, Backdrop::Clear);
    }

    #[test]
    fn json_documents_are_accepted() {
        let config = CircuitConfig::from_json_str(r#"{"tracks": 3, "gate_count": 8}"#).unwrap();
        assert_eq!(config.tracks, 3);
        assert_eq!(config.gate_count, 8);
        assert_eq!(config.dual_chance, 0.3);
    }

    #[test]
    fn overrides_merge_onto_preset() {
        let hero = FieldConfig::hero();
        let tuned = hero
            .with_overrides("target_count: 40\nwaves:\n  chance: 0.5\n")
            .unwrap();

        assert_eq!(tuned.target_count, 40);
        assert_eq!(tuned.waves.chance, 0.5);
        // Untouched hero values survive the merge
        assert_eq!(tuned.waves.style, WaveStyle::Glow);
        assert_eq!(tuned.burst.count, 30);
        assert_eq!(tuned.links.color, palette::WHITE);
    }

    #[test]
    fn empty_override_is_identity() {
        let hero = FieldConfig::hero();
        assert_eq!(hero.with_overrides("").unwrap(), hero);
    }

    #[test]
    fn yaml_round_trip_preserves_preset() {
        let hero = FieldConfig::hero();
        let yaml = hero.to_yaml_string().unwrap();
        assert_eq!(FieldConfig::from_yaml_str(&yaml).unwrap(), hero);
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            ("palette: []", "palette"),
            ("radius: [0.0, 2.0]", "radius"),
            ("radius: [3.0, 2.0]", "radius"),
            ("opacity: [0.2, 1.5]", "opacity"),
            ("damping: 0.0", "damping"),
            ("damping: 1.2", "damping"),
            ("waves:\n  chance: 2.0", "waves.chance"),
            ("waves:\n  speed: [0.0, 1.0]", "waves.speed"),
            ("speed: [-1.0e308, 1.0e308]", "speed"),
            ("burst:\n  fade: 0.0", "burst.fade"),
        ];
        for (doc, field) in cases {
            match FieldConfig::from_yaml_str(doc) {
                Err(ConfigError::Invalid { field: f, .. }) => assert_eq!(f, field, "{doc}"),
                other => panic!("{doc}: expected Invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn burst_fade_only_matters_when_bursts_spawn() {
        let config = FieldConfig::from_yaml_str("burst:\n  count: 0\n  fade: 0.0").unwrap();
        assert_eq!(config.burst.fade, 0.0);
    }

    #[test]
    fn span_sampling_stays_in_range_for_wide_spans() {
        let span = Span::new(-1.0e307, 1.0e307);
        span.check("speed").unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(span.contains(span.sample(&mut rng)));
        }
    }

    #[test]
    fn circuit_rejects_zero_step() {
        let result = CircuitConfig::from_yaml_str("time_step: [0.0, 1.0]");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));

        let result = CircuitConfig::from_yaml_str("tracks: 0");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let result = FieldConfig::from_yaml_str("target_count: [unclosed");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn loads_from_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("calm.yaml");
        fs::write(&yaml_path, "target_count: 7\n").unwrap();
        assert_eq!(FieldConfig::load(&yaml_path).unwrap().target_count, 7);

        let json_path = dir.path().join("calm.json");
        fs::write(&json_path, r#"{"target_count": 9}"#).unwrap();
        assert_eq!(FieldConfig::load(&json_path).unwrap().target_count, 9);

        let missing = FieldConfig::load(&dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }
}
