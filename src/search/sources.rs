/// A forum searched through a `site:` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForumSource {
    pub name: &'static str,
    pub domain: &'static str,
}

impl ForumSource {
    pub fn scoped_query(&self, keyword: &str) -> String {
        format!("{keyword} site:{}", self.domain)
    }
}

/// Searched on every request, in this order.
pub const FORUMS: [ForumSource; 3] = [
    ForumSource {
        name: "Dcard",
        domain: "dcard.tw",
    },
    ForumSource {
        name: "PTT",
        domain: "ptt.cc",
    },
    ForumSource {
        name: "Mobile01",
        domain: "mobile01.com",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_query_appends_site_filter() {
        let ptt = FORUMS[1];
        assert_eq!(ptt.scoped_query("iphone 16"), "iphone 16 site:ptt.cc");
    }

    #[test]
    fn forum_names_are_unique() {
        let mut names: Vec<_> = FORUMS.iter().map(|f| f.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FORUMS.len());
    }
}
