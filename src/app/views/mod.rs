// 畫面模型與 askama 樣板；這一層不碰網路
pub mod autocomplete;
pub mod controls;
pub mod detail;
pub mod listing;
pub mod status;

pub use autocomplete::{AutocompleteView, Suggestion};
pub use detail::DetailView;
pub use listing::{ProgramCard, ResultsView};
pub use status::{BadgeTone, StatusBadge};
