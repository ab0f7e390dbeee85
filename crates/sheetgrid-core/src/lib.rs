//! `sheetgrid-core` renders large string grids as a searchable, sortable terminal table.
//!
//! A [`grid::Grid`] is a header row plus data rows. [`table::TableView`] filters it through a
//! debounced search box, orders it by one column, sizes the columns, and draws only the rows
//! that fit the viewport.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input, debounce ticks and rendering from your app.
//! - Nothing in the pipeline fails: blank and malformed cells display as `-` and sort last.
//! - Rendering cost depends on the viewport height, not on the number of rows.
//!
//! ## Pipeline
//!
//! Grid → [`filter::filter_rows`] → [`sort::sort_rows`] → [`layout::column_widths`] +
//! [`window::RowWindow`] → rendered rows. [`scroll::ScrollSync`] keeps the header band aligned
//! with the horizontally scrolled body.
//!
//! Useful entry points:
//! - [`table::TableView`]: the composed widget.
//! - [`line_input::LineInput`]: single-line text field for search and login forms.
//! - [`help::HelpBar`]: one-line key binding summary.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod render;
pub mod scroll;
pub mod viewport;

pub mod classify;
pub mod debounce;
pub mod filter;
pub mod grid;
pub mod layout;
pub mod sort;
pub mod window;

pub mod help;
pub mod input;
pub mod keymap;
pub mod line_input;
pub mod table;
