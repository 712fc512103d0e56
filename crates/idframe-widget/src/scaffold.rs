//! Scaffold capability and the in-memory implementation.
//!
//! The widget never touches a concrete document model. Anything that can
//! mount a template, host an embedded frame, and tear both down again
//! implements [`Scaffold`]; the widget drives it through this trait and
//! tests observe it through the probe methods.
//!
//! # Scaffold Contract
//!
//! The template generator produces a root container identifiable by the
//! widget's unique id, containing exactly one embedded-surface
//! placeholder. `remove_frame` drops only the placeholder (the static
//! scaffold stays, ready for a retry); `remove_root` drops everything.

use crate::state::WidgetState;
use idframe_types::WidgetId;

/// Markup for a freshly mounted widget scaffold.
///
/// This is the template-generator boundary: one root container stamped
/// with the widget's DOM id, one frame placeholder inside it.
#[must_use]
pub fn widget_markup(id: &WidgetId) -> String {
    format!(
        concat!(
            "<div id=\"{root}\" data-state=\"{state}\" style=\"display:block\">",
            "<iframe frameborder=\"0\" allow=\"clipboard-write\"></iframe>",
            "</div>"
        ),
        root = id.dom_id(),
        state = WidgetState::NotLoaded.data_state(),
    )
}

/// Capability interface over the widget's visual scaffold.
///
/// Mutators must be tolerant: calling any of them when the scaffold (or
/// the frame) is already gone is a no-op, never a panic. The widget
/// relies on this for its teardown-from-any-state guarantee.
pub trait Scaffold: Send + std::fmt::Debug {
    /// Builds the scaffold for `id` inside the mount target.
    ///
    /// Mounting again after `remove_root` produces a fresh scaffold.
    fn mount(&mut self, id: &WidgetId);

    /// Returns `true` while the root container exists.
    fn is_mounted(&self) -> bool;

    /// Points the embedded frame at `url`.
    fn set_frame_src(&mut self, url: &str);

    /// Returns the current frame source, if one was set.
    fn frame_src(&self) -> Option<String>;

    /// Returns `true` while the frame placeholder exists.
    fn has_frame(&self) -> bool;

    /// Removes the frame placeholder, keeping the root container.
    fn remove_frame(&mut self);

    /// Removes the whole scaffold from the page.
    fn remove_root(&mut self);

    /// Toggles root-container visibility.
    fn set_visible(&mut self, visible: bool);

    /// Returns the current visibility.
    fn is_visible(&self) -> bool;

    /// Applies a reported height (px) to the root container.
    fn set_height(&mut self, px: f64);

    /// Returns the last applied height, if any.
    fn height(&self) -> Option<f64>;

    /// Writes the lifecycle state to the root's `data-state` attribute.
    fn set_state(&mut self, state: WidgetState);
}

/// Recording scaffold for tests and headless hosts.
///
/// Stores every mutation so assertions can inspect exactly what the
/// widget did, in the spirit of the other in-memory doubles in this
/// workspace.
#[derive(Debug, Default)]
pub struct MemoryScaffold {
    mounted: bool,
    markup: Option<String>,
    frame_present: bool,
    frame_src: Option<String>,
    visible: bool,
    height: Option<f64>,
    data_state: Option<WidgetState>,
    root_removals: usize,
}

impl MemoryScaffold {
    /// Creates an unmounted scaffold.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the markup produced at mount time.
    #[must_use]
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    /// Returns the last `data-state` written.
    #[must_use]
    pub fn data_state(&self) -> Option<WidgetState> {
        self.data_state
    }

    /// Returns how many times the root was actually removed.
    #[must_use]
    pub fn root_removals(&self) -> usize {
        self.root_removals
    }
}

impl Scaffold for MemoryScaffold {
    fn mount(&mut self, id: &WidgetId) {
        self.mounted = true;
        self.markup = Some(widget_markup(id));
        self.frame_present = true;
        self.frame_src = None;
        self.visible = true;
        self.height = None;
        self.data_state = Some(WidgetState::NotLoaded);
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn set_frame_src(&mut self, url: &str) {
        if self.frame_present {
            self.frame_src = Some(url.to_string());
        }
    }

    fn frame_src(&self) -> Option<String> {
        self.frame_src.clone()
    }

    fn has_frame(&self) -> bool {
        self.frame_present
    }

    fn remove_frame(&mut self) {
        self.frame_present = false;
        self.frame_src = None;
    }

    fn remove_root(&mut self) {
        if self.mounted {
            self.root_removals += 1;
        }
        self.mounted = false;
        self.markup = None;
        self.frame_present = false;
        self.frame_src = None;
        self.height = None;
    }

    fn set_visible(&mut self, visible: bool) {
        if self.mounted {
            self.visible = visible;
        }
    }

    fn is_visible(&self) -> bool {
        self.mounted && self.visible
    }

    fn set_height(&mut self, px: f64) {
        if self.mounted {
            self.height = Some(px);
        }
    }

    fn height(&self) -> Option<f64> {
        self.height
    }

    fn set_state(&mut self, state: WidgetState) {
        if self.mounted {
            self.data_state = Some(state);
        }
    }
}
