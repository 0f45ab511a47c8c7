//! Plain text rendering of the users listing.

use std::fmt::Write as _;

use itertools::Itertools as _;

use service::{directory::Notification, read::user::list::View};

/// Renders the provided [`View`] of the users listing as plain text.
#[must_use]
pub fn render(view: &View<'_>, notification: Option<&Notification>) -> String {
    let mut out = String::new();

    if let Some(n) = notification {
        _ = writeln!(out, "{n}");
    }
    if let Some(hint) = view.search_hint() {
        _ = writeln!(out, "{hint}");
    }
    _ = writeln!(out, "{}", view.results_label());

    if let Some(empty) = view.empty_state() {
        _ = writeln!(out, "{empty}");
        return out;
    }

    for user in &view.page.items {
        _ = write!(out, "[{}] {} <{}>", user.id, user.name, user.email);
        if !user.role.is_empty() {
            _ = write!(out, " ({})", user.role);
        }
        if let Some(child) = &user.child {
            _ = write!(out, ", child: {} {}", child.firstname, child.lastname);
        }
        out.push('\n');
    }

    let page = &view.page;
    if page.is_paginated() {
        _ = writeln!(out, "Page {} of {}", page.number, page.total_pages);
        let numbers = page
            .numbers()
            .map(|n| {
                if n == page.number.get() {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .join(" ");
        _ = writeln!(
            out,
            "{}{numbers}{}",
            if page.has_previous() { "< " } else { "" },
            if page.has_next() { " >" } else { "" },
        );
    }

    out
}

#[cfg(test)]
mod spec {
    use common::pagination::{Number, Size};
    use service::{
        directory::Notification,
        domain::User,
        read::user::list::{Filter, View},
    };

    use super::render;

    fn users(n: usize) -> Vec<User> {
        (1..=n)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": i.to_string(),
                    "name": format!("User {i}"),
                    "email": format!("user{i}@example.com"),
                    "role": if i == 1 { "admin" } else { "" },
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn renders_page() {
        let users = users(7);
        let view = View::project(
            &users,
            &Filter::default(),
            Number::new(2).unwrap(),
            Size::new(5).unwrap(),
        );

        assert_eq!(
            render(&view, None),
            "7 results\n\
             [6] User 6 <user6@example.com>\n\
             [7] User 7 <user7@example.com>\n\
             Page 2 of 2\n\
             < 1 [2]\n",
        );
    }

    #[test]
    fn renders_pager_around_current_page() {
        let users = users(12);
        let view = View::project(
            &users,
            &Filter::default(),
            Number::new(2).unwrap(),
            Size::new(5).unwrap(),
        );

        assert!(render(&view, None).ends_with("Page 2 of 3\n< 1 [2] 3 >\n"));
    }

    #[test]
    fn renders_search_outcome() {
        let users = users(3);
        let filter = Filter {
            search: "user1".to_owned(),
            ..Filter::default()
        };
        let view =
            View::project(&users, &filter, Number::FIRST, Size::new(5).unwrap());
        let flash = Notification::from("✅ User added successfully!");

        assert_eq!(
            render(&view, Some(&flash)),
            "✅ User added successfully!\n\
             ✅ 1 user found\n\
             1 result\n\
             [1] User 1 <user1@example.com> (admin)\n",
        );
    }

    #[test]
    fn renders_empty_state() {
        let view = View::project(
            &[],
            &Filter::default(),
            Number::FIRST,
            Size::new(5).unwrap(),
        );

        assert_eq!(
            render(&view, None),
            "0 results\nNo users found. Add one to get started.\n",
        );
    }
}
