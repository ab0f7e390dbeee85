pub mod view;

pub use view::ColumnSpan;
pub use view::TableAction;
pub use view::TableView;
pub use view::TableViewOptions;
