//! Tab-completion state

/// Completion function: current text in, candidate continuations out
pub type AutoComplete = Box<dyn Fn(&str) -> Option<Vec<String>>>;

/// Cached completions being cycled with Tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    list: Vec<String>,
    index: usize,
}

impl Suggestions {
    pub fn new(list: Vec<String>) -> Self {
        Self { list, index: 0 }
    }

    pub fn list(&self) -> &[String] {
        &self.list
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The candidate currently shown as ghost text
    pub fn current(&self) -> &str {
        self.list.get(self.index).map(String::as_str).unwrap_or("")
    }

    pub fn advance(&mut self) {
        if !self.list.is_empty() {
            self.index = (self.index + 1) % self.list.len();
        }
    }
}

/// Strip the leading characters every candidate shares and return them
pub fn take_common_prefix(list: &mut [String]) -> String {
    let mut prefix = String::new();
    loop {
        let Some(first) = list.first().and_then(|s| s.chars().next()) else {
            break;
        };
        if !list.iter().all(|s| s.starts_with(first)) {
            break;
        }
        prefix.push(first);
        for s in list.iter_mut() {
            s.drain(..first.len_utf8());
        }
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_prefix() {
        let mut list = vec!["sure".to_string(), "sles".to_string()];
        assert_eq!(take_common_prefix(&mut list), "s");
        assert_eq!(list, ["ure", "les"]);

        let mut list = vec!["same".to_string(), "same".to_string()];
        assert_eq!(take_common_prefix(&mut list), "same");
        assert_eq!(list, ["", ""]);

        let mut list = vec!["a".to_string(), "b".to_string()];
        assert_eq!(take_common_prefix(&mut list), "");
    }

    #[test]
    fn test_cycle() {
        let mut s = Suggestions::new(vec!["a".into(), "b".into(), "c".into()]);
        let seen: Vec<String> = (0..4)
            .map(|_| {
                let current = s.current().to_string();
                s.advance();
                current
            })
            .collect();
        assert_eq!(seen, ["a", "b", "c", "a"]);
    }
}
