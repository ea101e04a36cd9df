/// Which screen the browser shows when no confirmation is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserMode {
    Loading,
    Listing,
    FileView,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    #[default]
    SizeDesc,
    NameAsc,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::SizeDesc => SortMode::NameAsc,
            SortMode::NameAsc => SortMode::SizeDesc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::SizeDesc => "Size ↓",
            SortMode::NameAsc => "Name A-Z",
        }
    }
}
