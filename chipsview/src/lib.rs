//! chipsview is the platform-independent core of a chips input control: a
//! single-line text field preceded by compact, selectable, deletable chips
//! that wrap across rows.
//!
//! # Overview
//!
//! The host application owns rendering and text shaping. It tells the core
//! how wide the container and each chip are through a
//! [`ChipMeasurer`](measure::ChipMeasurer), forwards taps and input events,
//! and draws whatever [`ChipsView::rows`] and [`ChipsView::layout`] report.
//!
//! ```
//! use chipsview::{ChipsConfig, ChipsView, measure::MonospaceMeasurer, px::Px};
//!
//! let measurer = MonospaceMeasurer::new(Px(1), Px(2), Px(1)).with_container_width(Px(40));
//! let mut view = ChipsView::new(ChipsConfig::default(), measurer).expect("valid config");
//!
//! view.set_text_changed_listener(|text: &str| println!("query: {text}"));
//! view.add_chip(None, None, 7u32, "alice@example.com".to_owned());
//!
//! let layout = view.layout().expect("container is measured");
//! assert_eq!(layout.row_count(), 1);
//! assert_eq!(layout.text_margin().first_line, Px(20));
//! ```
//!
//! # Layout
//!
//! Chips flow left to right and wrap greedily ([`flow_layout`]). The text
//! field shares the last row; its first line is indented by the width that
//! row already uses ([`margin`]). When the container has no width yet the
//! relayout is parked and retried from [`ChipsView::on_frame`] ([`relayout`]).
//!
//! # Interaction
//!
//! Tapping a chip selects it; tapping it again deletes it. Backspace on empty
//! text selects the last chip, and a second backspace deletes it
//! ([`selection`], [`input`]). Indelible chips never become selected and so
//! can never be deleted by the user.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod chip;
pub mod collection;
pub mod config;
pub mod dp;
pub mod flow_layout;
pub mod input;
pub mod listener;
pub mod margin;
pub mod measure;
pub mod px;
pub mod relayout;
pub mod selection;
pub mod text_buffer;
pub mod view;

pub use chip::{Chip, ChipData};
pub use collection::ChipCollection;
pub use config::{ChipMetrics, ChipsConfig, ConfigError};
pub use flow_layout::{FlowLayout, LayoutNotReady, RowPartition};
pub use input::{InputDisposition, InputEvent, KeyAction, KeyCode};
pub use measure::ChipMeasurer;
pub use selection::{Interaction, SelectionState};
pub use text_buffer::{LeadingMargin, TextBuffer};
pub use view::{ChipsLayout, ChipsView};
