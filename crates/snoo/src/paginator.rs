//! Cursor-based listing pagination.
//!
//! A [`Paginator`] walks one listing endpoint in either direction. Its
//! position is two fullnames: the last item of the most recent forward page
//! and the first item of the most recent backward page. Both are taken from
//! the decoded items, not from the `after`/`before` fields the server echoes,
//! so short pages cannot desynchronise the cursor.
//!
//! An empty page means the listing is exhausted in that direction. The
//! paginator stays usable and will keep asking for the same position.

use tracing::{debug, instrument};

use crate::endpoints::ListingQuery;
use crate::error::Error;
use crate::session::Session;
use crate::thing::Item;
use crate::types::Fullname;

/// Largest page size the server honours.
pub const MAX_LIMIT: u8 = 100;

/// Which cursor a request runs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Cursor state over one listing endpoint.
///
/// Obtained from [`Session::listing`] or [`Session::subreddit`]. Each
/// paginator owns its position; two paginators over the same endpoint are
/// independent. Methods take `&mut self`, so a paginator cannot be driven
/// from two tasks at once without external synchronisation.
///
/// # Example
///
/// ```no_run
/// # async fn example(session: snoo::Session) -> Result<(), snoo::Error> {
/// let mut new = session.listing("r/rust/new");
/// new.set_limit(25);
///
/// loop {
///     let page = new.next().await?;
///     if page.is_empty() {
///         break;
///     }
///     for link in page.iter().filter_map(|item| item.as_link()) {
///         println!("{}", link.title);
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Paginator {
    session: Session,
    url: String,
    after: Option<Fullname>,
    before: Option<Fullname>,
    count: u64,
    limit: u8,
}

impl Paginator {
    pub(crate) fn new(session: Session, url: String) -> Self {
        Self {
            session,
            url,
            after: None,
            before: None,
            count: 0,
            limit: 0,
        }
    }

    /// The endpoint this paginator walks.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fullname of the last item of the most recent forward page.
    pub fn after(&self) -> Option<&Fullname> {
        self.after.as_ref()
    }

    /// Fullname of the first item of the most recent backward page.
    pub fn before(&self) -> Option<&Fullname> {
        self.before.as_ref()
    }

    /// Number of items seen going forward, minus those walked back over.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Requested page size. `0` lets the server choose.
    pub fn limit(&self) -> u8 {
        self.limit
    }

    /// Set the page size, clamped to `0..=MAX_LIMIT`.
    pub fn set_limit(&mut self, limit: i64) {
        self.limit = limit.clamp(0, i64::from(MAX_LIMIT)) as u8;
    }

    /// Fetch the page after the current forward cursor.
    ///
    /// On a non-empty page the forward cursor moves to the page's last item.
    /// On an empty page or an error nothing changes.
    #[instrument(skip(self), fields(url = %self.url, after = ?self.after))]
    pub async fn next(&mut self) -> Result<Vec<Item>, Error> {
        self.fetch(Direction::Forward).await
    }

    /// Fetch the page before the current backward cursor.
    ///
    /// On a non-empty page the backward cursor moves to the page's first item.
    #[instrument(skip(self), fields(url = %self.url, before = ?self.before))]
    pub async fn previous(&mut self) -> Result<Vec<Item>, Error> {
        self.fetch(Direction::Backward).await
    }

    async fn fetch(&mut self, direction: Direction) -> Result<Vec<Item>, Error> {
        let listing = self
            .session
            .fetch_listing(&self.url, &self.query(direction))
            .await?;
        let items = listing.items();

        debug!(
            children = listing.children.len(),
            items = items.len(),
            "listing page"
        );
        self.advance(direction, &items);

        Ok(items)
    }

    fn query(&self, direction: Direction) -> ListingQuery<'_> {
        let cursor = match direction {
            Direction::Forward => &self.after,
            Direction::Backward => &self.before,
        };
        let cursor = cursor.as_ref().map(Fullname::as_str);

        ListingQuery {
            after: cursor.filter(|_| direction == Direction::Forward),
            before: cursor.filter(|_| direction == Direction::Backward),
            count: Some(self.count).filter(|&c| c > 0),
            limit: Some(self.limit).filter(|&l| l > 0),
        }
    }

    fn advance(&mut self, direction: Direction, items: &[Item]) {
        let seen = items.len() as u64;

        match direction {
            Direction::Forward => {
                let Some(last) = items.last() else { return };
                if let Some(name) = last.fullname() {
                    self.after = Some(name);
                }
                self.count += seen;
            }
            Direction::Backward => {
                let Some(first) = items.first() else { return };
                if let Some(name) = first.fullname() {
                    self.before = Some(name);
                }
                self.count = self.count.saturating_sub(seen);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, Link};

    fn paginator() -> Paginator {
        let session = Session::new("snoo-test/0.1").unwrap();
        let url = "https://www.reddit.com/r/rust/new.json".to_string();
        Paginator::new(session, url)
    }

    fn link(id: &str) -> Item {
        Item::Link(Link {
            id: id.to_string(),
            name: format!("t3_{id}"),
            ..Default::default()
        })
    }

    #[test]
    fn fresh_paginator_sends_no_parameters() {
        let p = paginator();
        assert_eq!(p.query(Direction::Forward), ListingQuery::default());
        assert_eq!(p.query(Direction::Backward), ListingQuery::default());
    }

    #[test]
    fn limit_is_clamped() {
        let mut p = paginator();
        p.set_limit(250);
        assert_eq!(p.limit(), MAX_LIMIT);
        p.set_limit(-3);
        assert_eq!(p.limit(), 0);
        p.set_limit(25);
        assert_eq!(p.limit(), 25);
    }

    #[test]
    fn zero_limit_is_omitted() {
        let mut p = paginator();
        p.set_limit(0);
        assert_eq!(p.query(Direction::Forward).limit, None);
        p.set_limit(10);
        assert_eq!(p.query(Direction::Forward).limit, Some(10));
    }

    #[test]
    fn forward_cursor_tracks_last_item() {
        let mut p = paginator();
        p.advance(Direction::Forward, &[link("a"), link("b"), link("c")]);

        assert_eq!(p.after().unwrap().as_str(), "t3_c");
        assert!(p.before().is_none());
        assert_eq!(p.count(), 3);

        let q = p.query(Direction::Forward);
        assert_eq!(q.after, Some("t3_c"));
        assert_eq!(q.before, None);
        assert_eq!(q.count, Some(3));
    }

    #[test]
    fn backward_cursor_tracks_first_item() {
        let mut p = paginator();
        p.advance(Direction::Forward, &[link("a"), link("b"), link("c")]);
        p.advance(Direction::Backward, &[link("x"), link("y")]);

        assert_eq!(p.before().unwrap().as_str(), "t3_x");
        assert_eq!(p.after().unwrap().as_str(), "t3_c");
        assert_eq!(p.count(), 1);

        let q = p.query(Direction::Backward);
        assert_eq!(q.before, Some("t3_x"));
        assert_eq!(q.after, None);
    }

    #[test]
    fn empty_page_leaves_state_unchanged() {
        let mut p = paginator();
        p.advance(Direction::Forward, &[link("a")]);

        p.advance(Direction::Forward, &[]);
        p.advance(Direction::Backward, &[]);

        assert_eq!(p.after().unwrap().as_str(), "t3_a");
        assert!(p.before().is_none());
        assert_eq!(p.count(), 1);
    }

    #[test]
    fn count_saturates_going_back() {
        let mut p = paginator();
        p.advance(Direction::Backward, &[link("a"), link("b")]);
        assert_eq!(p.count(), 0);
        assert_eq!(p.query(Direction::Backward).count, None);
    }

    #[test]
    fn item_without_fullname_keeps_previous_cursor() {
        let mut p = paginator();
        p.advance(Direction::Forward, &[link("a")]);
        p.advance(Direction::Forward, &[Item::Comment(Comment::default())]);

        assert_eq!(p.after().unwrap().as_str(), "t3_a");
        assert_eq!(p.count(), 2);
    }
}
