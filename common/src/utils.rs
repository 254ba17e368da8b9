pub mod search {
    use crate::models::Comic;

    /// Case-insensitive substring match on the title. A blank keyword
    /// matches everything.
    pub fn matches(comic: &Comic, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return true;
        }
        comic
            .title
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }

    pub fn filter(comics: Vec<Comic>, keyword: &str) -> Vec<Comic> {
        comics.into_iter().filter(|c| matches(c, keyword)).collect()
    }

}
