//! Page-number entry and the "has more" heuristic.

/// Outcome of committing the page-number input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommit {
  /// The input named a different, valid page.
  Changed(u32),
  /// The input was invalid or a no-op; it now mirrors the current page again.
  Reverted,
}

/// Editable mirror of the current page number.
///
/// Holds raw text so that anything the user types can be represented until
/// the edit is committed or reverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInput {
  text: String,
}

impl PageInput {
  pub fn new(page: u32) -> Self { Self { text: page.to_string() } }

  pub fn text(&self) -> &str { &self.text }

  /// Replace the in-progress edit.
  pub fn set_text(&mut self, text: impl Into<String>) { self.text = text.into(); }

  pub fn push(&mut self, c: char) { self.text.push(c); }

  pub fn pop(&mut self) { self.text.pop(); }

  /// Discard any edit and show `page` again.
  pub fn mirror(&mut self, page: u32) { self.text = page.to_string(); }

  /// Commit the edit against the `current` page.
  ///
  /// Non-numeric, zero, negative and unchanged values are rejected silently
  /// by reverting the text to `current`.
  pub fn commit(&mut self, current: u32) -> PageCommit {
    match parse_page(&self.text) {
      Some(page) if page != current => {
        self.mirror(page);
        PageCommit::Changed(page)
      }
      _ => {
        self.mirror(current);
        PageCommit::Reverted
      }
    }
  }
}

/// Parse user-entered text as a page number (`>= 1`).
pub fn parse_page(text: &str) -> Option<u32> {
  text.trim().parse::<u32>().ok().filter(|page| *page > 0)
}

/// Whether another page probably follows one that returned `len` rows.
///
/// There is no total count, so a full page is taken to mean "more". A last
/// page that happens to be exactly full reports a next page that turns out
/// empty.
pub fn has_next_page(len: usize, page_size: u32) -> bool {
  usize::try_from(page_size).is_ok_and(|size| len == size)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_accepts_positive_integers() {
    assert_eq!(parse_page("3"), Some(3));
    assert_eq!(parse_page(" 12 "), Some(12));
  }

  #[test]
  fn parse_rejects_zero_negative_and_text() {
    for bad in ["0", "-3", "abc", "", "2.5", "  "] {
      assert_eq!(parse_page(bad), None, "{bad:?} should be rejected");
    }
  }

  #[test]
  fn commit_changed_page() {
    let mut input = PageInput::new(1);
    input.set_text("4");
    assert_eq!(input.commit(1), PageCommit::Changed(4));
    assert_eq!(input.text(), "4");
  }

  #[test]
  fn commit_invalid_reverts_to_current() {
    for bad in ["0", "-3", "xyz"] {
      let mut input = PageInput::new(2);
      input.set_text(bad);
      assert_eq!(input.commit(2), PageCommit::Reverted);
      assert_eq!(input.text(), "2");
    }
  }

  #[test]
  fn commit_same_page_is_a_no_op() {
    let mut input = PageInput::new(5);
    input.set_text("05");
    assert_eq!(input.commit(5), PageCommit::Reverted);
    assert_eq!(input.text(), "5");
  }

  #[test]
  fn push_and_pop_edit_the_text() {
    let mut input = PageInput::new(1);
    input.pop();
    input.push('7');
    input.push('x');
    assert_eq!(input.text(), "7x");
  }

  #[test]
  fn full_page_means_more() {
    assert!(has_next_page(10, 10));
    assert!(!has_next_page(9, 10));
    assert!(!has_next_page(0, 10));
  }
}
