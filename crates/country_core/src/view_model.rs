#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListViewModel {
    pub spinner_visible: bool,
    pub rows: Vec<CountryRowView>,
    pub total_rows: usize,
    pub scroll_offset: usize,
    pub notice: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRowView {
    pub index: usize,
    pub title: String,
    pub code: String,
    pub capital: String,
}
