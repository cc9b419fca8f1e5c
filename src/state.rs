//! Color state controller.
//!
//! Owns the HSV+alpha state of the picker, the baseline it resets to, and the
//! one-shot initialization latch. Every mutation returns a [`Refresh`] that
//! tells the view layer which sliders and patches must be updated, so the
//! controller can be exercised without a window.

use log::{debug, trace};

use crate::color::ArgbColor;
use crate::gradient::TrackGradient;

/// One of the four adjustable channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Hue,
    Saturation,
    Brightness,
    Alpha,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Hue,
        Channel::Saturation,
        Channel::Brightness,
        Channel::Alpha,
    ];

    /// Tracks whose gradient depends on this channel.
    ///
    /// The hue track is a fixed rainbow and never appears here; the alpha
    /// channel feeds no track at all.
    pub fn dependents(self) -> &'static [Channel] {
        match self {
            Channel::Hue => &[Channel::Saturation, Channel::Brightness, Channel::Alpha],
            Channel::Saturation => &[Channel::Brightness, Channel::Alpha],
            Channel::Brightness => &[Channel::Saturation, Channel::Alpha],
            Channel::Alpha => &[],
        }
    }
}

/// Partial update: `None` leaves a channel unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelUpdate {
    /// Degrees, 0–360.
    pub hue: Option<f64>,
    pub saturation: Option<f64>,
    pub lightness: Option<f64>,
    pub alpha: Option<f64>,
}

impl ChannelUpdate {
    /// Update a single channel with a normalized 0.0–1.0 value.
    ///
    /// Hue is scaled to degrees.
    pub fn single(channel: Channel, normalized: f64) -> Self {
        let mut update = Self::default();
        match channel {
            Channel::Hue => update.hue = Some(normalized * 360.0),
            Channel::Saturation => update.saturation = Some(normalized),
            Channel::Brightness => update.lightness = Some(normalized),
            Channel::Alpha => update.alpha = Some(normalized),
        }
        update
    }
}

/// Current HSV+alpha selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorState {
    /// Degrees, 0–360.
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl ColorState {
    /// Decompose a packed color; alpha is taken from the color only when
    /// `transparency` is enabled.
    pub fn from_color(color: ArgbColor, transparency: bool) -> Self {
        let (hue, saturation, lightness) = color.to_hsv();
        let alpha = if transparency {
            color.a() as f64 / 255.0
        } else {
            1.0
        };
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }

    /// Apply the channels present in `update`. Values outside a channel's
    /// range are ignored.
    pub fn apply(&mut self, update: &ChannelUpdate) {
        if let Some(h) = update.hue.filter(|h| (0.0..=360.0).contains(h)) {
            self.hue = h;
        }
        if let Some(s) = update.saturation.filter(|s| (0.0..=1.0).contains(s)) {
            self.saturation = s;
        }
        if let Some(l) = update.lightness.filter(|l| (0.0..=1.0).contains(l)) {
            self.lightness = l;
        }
        if let Some(a) = update.alpha.filter(|a| (0.0..=1.0).contains(a)) {
            self.alpha = a;
        }
    }

    /// Pack into ARGB.
    pub fn to_color(&self) -> ArgbColor {
        let alpha = (self.alpha * 255.0).round() as u8;
        ArgbColor::from_hsv(alpha, self.hue, self.saturation, self.lightness)
    }

    /// Opaque color at the current hue/saturation/lightness.
    pub fn opaque_color(&self) -> ArgbColor {
        ArgbColor::from_hsv(255, self.hue, self.saturation, self.lightness)
    }

    /// Normalized slider position for `channel`.
    pub fn progress(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Hue => self.hue / 360.0,
            Channel::Saturation => self.saturation,
            Channel::Brightness => self.lightness,
            Channel::Alpha => self.alpha,
        }
    }

    /// Gradient shown behind `channel`'s track for this state.
    pub fn gradient(&self, channel: Channel) -> TrackGradient {
        match channel {
            Channel::Hue => TrackGradient::hue(),
            Channel::Saturation => TrackGradient::saturation(self.hue, self.lightness),
            Channel::Brightness => TrackGradient::brightness(self.hue, self.saturation),
            Channel::Alpha => TrackGradient::alpha(self.opaque_color()),
        }
    }

    /// Color applied to `channel`'s thumb.
    pub fn color_filter(&self, channel: Channel) -> ArgbColor {
        match channel {
            Channel::Hue => ArgbColor::from_hsv(255, self.hue, 1.0, 1.0),
            Channel::Saturation | Channel::Brightness => self.opaque_color(),
            Channel::Alpha => self.to_color(),
        }
    }

    /// Patch label: hue in degrees, saturation and lightness in percent, and
    /// alpha percent on a second line when `transparency` is set.
    pub fn summary(&self, transparency: bool) -> String {
        let mut text = format!(
            "{}° {}% {}%",
            self.hue as i32,
            (self.saturation * 100.0) as i32,
            (self.lightness * 100.0) as i32,
        );
        if transparency {
            text.push_str(&format!("\n{}%", (self.alpha * 100.0) as i32));
        }
        text
    }
}

impl Default for ColorState {
    fn default() -> Self {
        Self::from_color(ArgbColor::RED, false)
    }
}

/// Baseline the picker starts from and resets to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialConfig {
    pub initial_color: ArgbColor,
    pub transparency: bool,
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            initial_color: ArgbColor::RED,
            transparency: false,
        }
    }
}

/// Initialization phase of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No baseline applied yet.
    Uninitialized,
    /// Baseline applied, waiting for the first non-empty layout.
    Initializing,
    /// Sliders and patches have been synced once. Later layout passes do not
    /// re-sync slider positions.
    Ready,
}

/// What the view layer must update after a controller operation.
///
/// The after patch, its label and every thumb color filter are always
/// refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Refresh {
    /// Move all sliders to the state's positions (programmatically).
    pub sync_positions: bool,
    /// Tracks whose gradient must be regenerated.
    pub regenerate: Vec<Channel>,
    /// Re-render the before patch and its label.
    pub repaint_before: bool,
}

impl Refresh {
    fn full() -> Self {
        Self {
            sync_positions: true,
            regenerate: vec![Channel::Saturation, Channel::Brightness, Channel::Alpha],
            repaint_before: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorController {
    state: ColorState,
    initial: InitialConfig,
    phase: Phase,
}

impl Default for ColorController {
    fn default() -> Self {
        Self {
            state: ColorState::default(),
            initial: InitialConfig::default(),
            phase: Phase::Uninitialized,
        }
    }
}

impl ColorController {
    /// Creates a controller with `config` applied as baseline.
    pub fn new(config: InitialConfig) -> Self {
        let mut controller = Self::default();
        controller.set_initial_parameters(config.initial_color, config.transparency);
        controller
    }

    pub fn state(&self) -> ColorState {
        self.state
    }

    pub fn initial(&self) -> InitialConfig {
        self.initial
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn transparency(&self) -> bool {
        self.initial.transparency
    }

    /// Current color as packed ARGB.
    pub fn color(&self) -> ArgbColor {
        self.state.to_color()
    }

    /// State the baseline decomposes to.
    pub fn initial_state(&self) -> ColorState {
        ColorState::from_color(self.initial.initial_color, self.initial.transparency)
    }

    /// Replace the baseline and the current state.
    pub fn set_initial_parameters(&mut self, color: ArgbColor, transparency: bool) -> Refresh {
        self.initial = InitialConfig {
            initial_color: color,
            transparency,
        };
        self.state = self.initial_state();
        if self.phase == Phase::Uninitialized {
            debug!("color controller initializing from #{}", color.to_hex());
            self.phase = Phase::Initializing;
        } else {
            debug!(
                "color controller baseline set to #{} (transparency {})",
                color.to_hex(),
                transparency
            );
        }
        Refresh::full()
    }

    /// Apply `update` and return the new derived color.
    pub fn change_color(&mut self, update: ChannelUpdate) -> ArgbColor {
        self.state.apply(&update);
        let color = self.state.to_color();
        trace!("color changed to #{}", color.to_hex());
        color
    }

    /// A user drag on `channel`'s slider moved it to `normalized`.
    ///
    /// The dragged track keeps its gradient; only tracks depending on the
    /// channel are regenerated.
    pub fn drag(&mut self, channel: Channel, normalized: f64) -> Refresh {
        self.change_color(ChannelUpdate::single(channel, normalized));
        Refresh {
            sync_positions: false,
            regenerate: channel.dependents().to_vec(),
            repaint_before: false,
        }
    }

    /// Restore the state derived from the last baseline.
    pub fn reset(&mut self) -> Refresh {
        debug!("resetting to #{}", self.initial.initial_color.to_hex());
        self.state = self.initial_state();
        Refresh::full()
    }

    /// A layout pass produced `width` x `height`.
    ///
    /// Returns a refresh only on the first non-empty pass after the baseline
    /// was applied.
    pub fn layout(&mut self, width: f64, height: f64) -> Option<Refresh> {
        if self.phase != Phase::Initializing || width <= 0.0 || height <= 0.0 {
            return None;
        }
        debug!("first layout {width}x{height}, color controller ready");
        self.phase = Phase::Ready;
        Some(Refresh::full())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(h: Option<f64>, s: Option<f64>, l: Option<f64>, a: Option<f64>) -> ChannelUpdate {
        ChannelUpdate {
            hue: h,
            saturation: s,
            lightness: l,
            alpha: a,
        }
    }

    #[test]
    fn red_baseline() {
        let c = ColorController::new(InitialConfig {
            initial_color: ArgbColor::from_argb(0xFFFF_0000),
            transparency: false,
        });
        assert_eq!(
            c.state(),
            ColorState {
                hue: 0.0,
                saturation: 1.0,
                lightness: 1.0,
                alpha: 1.0
            }
        );
        assert_eq!(c.color().argb(), 0xFFFF_0000);
        assert_eq!(c.phase(), Phase::Initializing);
    }

    #[test]
    fn alpha_ignored_without_transparency() {
        let opaque = ColorController::new(InitialConfig {
            initial_color: ArgbColor::from_argb(0x8000_00FF),
            transparency: false,
        });
        assert_eq!(opaque.state().alpha, 1.0);
        assert_eq!(opaque.color().argb(), 0xFF00_00FF);

        let translucent = ColorController::new(InitialConfig {
            initial_color: ArgbColor::from_argb(0x8000_00FF),
            transparency: true,
        });
        assert!((translucent.state().alpha - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(translucent.color().argb(), 0x8000_00FF);
    }

    #[test]
    fn hue_drag_to_120_gives_green() {
        let mut c = ColorController::new(InitialConfig::default());
        c.drag(Channel::Hue, 120.0 / 360.0);
        assert_eq!(c.color().argb(), 0xFF00_FF00);
    }

    #[test]
    fn change_color_is_idempotent() {
        let mut c = ColorController::new(InitialConfig::default());
        let u = update(Some(200.0), Some(0.4), None, None);
        let first = c.change_color(u);
        let state = c.state();
        let second = c.change_color(u);
        assert_eq!(first, second);
        assert_eq!(state, c.state());
    }

    #[test]
    fn independent_channels_commute() {
        let mut split = ColorController::new(InitialConfig::default());
        split.change_color(update(Some(45.0), None, None, None));
        split.change_color(update(None, Some(0.3), None, None));

        let mut joint = ColorController::new(InitialConfig::default());
        joint.change_color(update(Some(45.0), Some(0.3), None, None));

        assert_eq!(split.state(), joint.state());
    }

    #[test]
    fn zero_is_a_real_value() {
        let mut c = ColorController::new(InitialConfig::default());
        c.change_color(update(None, Some(0.0), None, None));
        assert_eq!(c.state().saturation, 0.0);
        assert_eq!(c.color().argb(), 0xFFFF_FFFF);
    }

    #[test]
    fn out_of_range_values_are_ignored() {
        let mut c = ColorController::new(InitialConfig::default());
        let before = c.state();
        c.change_color(update(Some(-1.0), Some(1.5), Some(-0.1), Some(2.0)));
        assert_eq!(before, c.state());
    }

    #[test]
    fn reset_restores_baseline_after_drags() {
        let mut c = ColorController::new(InitialConfig {
            initial_color: ArgbColor::from_argb(0xC033_6699),
            transparency: true,
        });
        let baseline = c.state();
        c.drag(Channel::Hue, 0.9);
        c.drag(Channel::Saturation, 0.1);
        c.drag(Channel::Alpha, 0.2);
        assert_ne!(baseline, c.state());

        let refresh = c.reset();
        assert_eq!(baseline, c.state());
        assert!(refresh.sync_positions && refresh.repaint_before);
    }

    #[test]
    fn reset_does_not_change_phase() {
        let mut c = ColorController::new(InitialConfig::default());
        c.reset();
        assert_eq!(c.phase(), Phase::Initializing);
        c.layout(100.0, 40.0);
        c.reset();
        assert_eq!(c.phase(), Phase::Ready);
    }

    #[test]
    fn drag_never_regenerates_own_track() {
        let mut c = ColorController::new(InitialConfig::default());
        for channel in Channel::ALL {
            let refresh = c.drag(channel, 0.5);
            assert!(!refresh.regenerate.contains(&channel));
            assert!(!refresh.regenerate.contains(&Channel::Hue));
            assert!(!refresh.sync_positions);
        }
        assert!(c.drag(Channel::Alpha, 0.5).regenerate.is_empty());
        assert_eq!(
            c.drag(Channel::Hue, 0.5).regenerate,
            vec![Channel::Saturation, Channel::Brightness, Channel::Alpha]
        );
        assert_eq!(
            c.drag(Channel::Saturation, 0.5).regenerate,
            vec![Channel::Brightness, Channel::Alpha]
        );
        assert_eq!(
            c.drag(Channel::Brightness, 0.5).regenerate,
            vec![Channel::Saturation, Channel::Alpha]
        );
    }

    #[test]
    fn first_non_empty_layout_initializes_once() {
        let mut c = ColorController::default();
        assert_eq!(c.phase(), Phase::Uninitialized);
        assert!(c.layout(200.0, 100.0).is_none());

        c.set_initial_parameters(ArgbColor::RED, false);
        assert!(c.layout(0.0, 100.0).is_none());
        assert_eq!(c.phase(), Phase::Initializing);

        let refresh = c.layout(200.0, 100.0);
        assert_eq!(refresh, Some(Refresh::full()));
        assert_eq!(c.phase(), Phase::Ready);

        // rotation: no re-sync
        assert!(c.layout(100.0, 200.0).is_none());
    }

    #[test]
    fn saturation_gradient_endpoints() {
        let mut c = ColorController::new(InitialConfig::default());
        c.change_color(update(Some(210.0), Some(0.5), Some(0.6), None));
        let g = c.state().gradient(Channel::Saturation);
        assert_eq!(g.stops()[0], ArgbColor::from_hsv(255, 210.0, 0.0, 0.6));
        assert_eq!(g.stops()[1], ArgbColor::from_hsv(255, 210.0, 1.0, 0.6));
    }

    #[test]
    fn color_filters() {
        let mut c = ColorController::new(InitialConfig {
            initial_color: ArgbColor::RED,
            transparency: true,
        });
        c.change_color(update(Some(240.0), Some(0.5), Some(1.0), Some(0.5)));
        let s = c.state();
        assert_eq!(s.color_filter(Channel::Hue).argb(), 0xFF00_00FF);
        assert_eq!(s.color_filter(Channel::Saturation).argb(), 0xFF80_80FF);
        assert_eq!(s.color_filter(Channel::Alpha).argb(), 0x8080_80FF);
    }

    #[test]
    fn summary_text() {
        let s = ColorState {
            hue: 120.7,
            saturation: 0.555,
            lightness: 1.0,
            alpha: 0.5,
        };
        assert_eq!(s.summary(false), "120° 55% 100%");
        assert_eq!(s.summary(true), "120° 55% 100%\n50%");
    }
}
