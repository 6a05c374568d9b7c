//! Paginated user list on the home page.

use std::cell::RefCell;

use userhub_client::ApiClient;
use userhub_client::models::User;

use crate::core::pager::Pager;

/// Pager over the public user list.
pub type UserPager = Pager<User>;

/// Navigation requested from the list controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageNav {
    /// First page at the current size.
    First,
    /// Following page.
    Next,
    /// Preceding page.
    Previous,
    /// New page size, back to page 0.
    Resize(u32),
}

/// Fetch the page selected by `nav`.
///
/// Returns `false` when the navigation is unavailable or the response was superseded.
pub async fn load(
    pager: &RefCell<UserPager>,
    client: &ApiClient,
    nav: PageNav,
    notify: impl Fn(),
) -> bool {
    let ticket = {
        let mut pager = pager.borrow_mut();
        match nav {
            PageNav::First => Some(pager.load_page(0)),
            PageNav::Next => pager.next(),
            PageNav::Previous => pager.previous(),
            PageNav::Resize(size) => Some(pager.resize(size)),
        }
    };
    let Some(ticket) = ticket else {
        return false;
    };
    notify();
    let result = client.load_users(*ticket.param()).await;
    let applied = pager.borrow_mut().settle(&ticket, result);
    if applied {
        notify();
    }
    applied
}
