//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

pub mod list {
    //! [`User`]s list definitions.
    //!
    //! A [`View`] is always derived from the full local list of [`User`]s, so
    //! it never has to be invalidated: it's recomputed on every change.

    use std::{convert::Infallible, fmt, str::FromStr};

    use common::pagination::{self, Page};
    use itertools::Itertools as _;

    use crate::domain::{user, User};

    /// Filter by [`user::Role`] of the [`User`]s list.
    #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
    pub enum RoleFilter {
        /// Any [`user::Role`] matches.
        #[default]
        All,

        /// Only the exactly equal [`user::Role`] matches.
        Exact(user::Role),
    }

    impl RoleFilter {
        /// Textual representation of the [`RoleFilter::All`].
        pub const ALL: &'static str = "all";

        /// Indicates whether the provided [`user::Role`] passes this
        /// [`RoleFilter`].
        #[must_use]
        pub fn matches(&self, role: &user::Role) -> bool {
            match self {
                Self::All => true,
                Self::Exact(r) => r == role,
            }
        }
    }

    impl fmt::Display for RoleFilter {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::All => f.write_str(Self::ALL),
                Self::Exact(role) => write!(f, "{role}"),
            }
        }
    }

    impl FromStr for RoleFilter {
        type Err = Infallible;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Ok(if s == Self::ALL {
                Self::All
            } else {
                user::Role::new(s).map_or(Self::All, Self::Exact)
            })
        }
    }

    /// Filter of the [`User`]s list.
    #[derive(Clone, Debug, Default, Eq, PartialEq)]
    pub struct Filter {
        /// Case-insensitive substring to search for in [`user::Name`]s and
        /// [`user::Email`]s.
        ///
        /// Empty one matches everything.
        pub search: String,

        /// [`RoleFilter`] to apply.
        pub role: RoleFilter,
    }

    impl Filter {
        /// Indicates whether the provided [`User`] passes this [`Filter`].
        #[must_use]
        pub fn matches(&self, user: &User) -> bool {
            let term = self.search.to_lowercase();
            let found = term.is_empty()
                || user.name.as_ref().to_lowercase().contains(&term)
                || user.email.as_ref().to_lowercase().contains(&term);

            found && self.role.matches(&user.role)
        }
    }

    /// Returns the [`RoleFilter`]s applicable to the provided [`User`]s.
    ///
    /// [`RoleFilter::All`] goes first, followed by every distinct non-empty
    /// [`user::Role`] in the order of its first occurrence.
    pub fn roles<'u>(
        users: impl IntoIterator<Item = &'u User>,
    ) -> Vec<RoleFilter> {
        let distinct = users
            .into_iter()
            .map(|u| &u.role)
            .filter(|r| !r.is_empty())
            .unique()
            .cloned()
            .map(RoleFilter::Exact);

        [RoleFilter::All].into_iter().chain(distinct).collect()
    }

    /// Projection of the [`User`]s list onto a [`Filter`] and a [`Page`].
    #[derive(Clone, Debug)]
    pub struct View<'u> {
        /// [`User`]s passing the [`Filter`].
        pub filtered: Vec<&'u User>,

        /// [`RoleFilter`]s applicable to the whole list.
        pub roles: Vec<RoleFilter>,

        /// Requested [`Page`] of the filtered [`User`]s.
        pub page: Page<&'u User>,

        /// Total number of [`User`]s in the whole list.
        pub total_users: usize,

        /// Indicator whether a search term is applied.
        is_searching: bool,
    }

    impl<'u> View<'u> {
        /// Projects the provided `users` onto the [`Filter`] and the
        /// requested [`Page`].
        #[must_use]
        pub fn project(
            users: &'u [User],
            filter: &Filter,
            number: pagination::Number,
            size: pagination::Size,
        ) -> Self {
            let filtered =
                users.iter().filter(|u| filter.matches(u)).collect_vec();
            Self {
                page: Page::cut(filtered.clone(), number, size),
                filtered,
                roles: roles(users),
                total_users: users.len(),
                is_searching: !filter.search.is_empty(),
            }
        }

        /// Returns the label describing the number of filtered [`User`]s.
        #[must_use]
        pub fn results_label(&self) -> String {
            let n = self.filtered.len();
            format!("{n} result{}", plural(n))
        }

        /// Returns the hint about the search outcome, if any search term is
        /// applied.
        #[must_use]
        pub fn search_hint(&self) -> Option<String> {
            if !self.is_searching {
                return None;
            }
            Some(match self.filtered.len() {
                0 => "❌ No users found".to_owned(),
                n => format!("✅ {n} user{} found", plural(n)),
            })
        }

        /// Returns the message to show instead of an empty list, if the list
        /// is empty.
        #[must_use]
        pub fn empty_state(&self) -> Option<&'static str> {
            if !self.filtered.is_empty() {
                return None;
            }
            Some(if self.total_users == 0 {
                "No users found. Add one to get started."
            } else {
                "No users match your search criteria."
            })
        }
    }

    /// Returns the plural suffix for the provided count.
    fn plural(n: usize) -> &'static str {
        if n == 1 {
            ""
        } else {
            "s"
        }
    }

    #[cfg(test)]
    mod spec {
        use common::pagination::{Number, Size};

        use crate::domain::{user, User};

        use super::{roles, Filter, RoleFilter, View};

        fn user(id: &str, name: &str, email: &str, role: &str) -> User {
            serde_json::from_value(serde_json::json!({
                "id": id,
                "name": name,
                "email": email,
                "role": role,
            }))
            .unwrap()
        }

        fn users() -> Vec<User> {
            vec![
                user("1", "Ann", "ann@x.com", "admin"),
                user("2", "Bob", "bob@y.com", "user"),
                user("3", "Cid", "cid@x.com", "admin"),
                user("4", "Dee", "dee@z.com", ""),
            ]
        }

        fn role(r: &str) -> RoleFilter {
            RoleFilter::Exact(user::Role::new(r).unwrap())
        }

        fn size(n: usize) -> Size {
            Size::new(n).unwrap()
        }

        fn ids(users: &[&User]) -> Vec<String> {
            users.iter().map(|u| u.id.to_string()).collect()
        }

        #[test]
        fn searches_case_insensitively() {
            let users = users();
            let filter = Filter {
                search: "X.COM".to_owned(),
                ..Filter::default()
            };

            let view = View::project(&users, &filter, Number::FIRST, size(5));

            assert_eq!(ids(&view.filtered), ["1", "3"]);
        }

        #[test]
        fn searches_names_and_emails() {
            let users = users();
            let by_name = Filter {
                search: "bo".to_owned(),
                ..Filter::default()
            };
            let by_email = Filter {
                search: "@z".to_owned(),
                ..Filter::default()
            };

            let view = View::project(&users, &by_name, Number::FIRST, size(5));
            assert_eq!(ids(&view.filtered), ["2"]);

            let view =
                View::project(&users, &by_email, Number::FIRST, size(5));
            assert_eq!(ids(&view.filtered), ["4"]);
        }

        #[test]
        fn combines_search_and_role() {
            let users = users();
            let filter = Filter {
                search: "x.com".to_owned(),
                role: role("admin"),
            };

            let view = View::project(&users, &filter, Number::FIRST, size(5));
            assert_eq!(ids(&view.filtered), ["1", "3"]);

            let filter = Filter {
                search: "ann".to_owned(),
                role: role("user"),
            };
            let view = View::project(&users, &filter, Number::FIRST, size(5));
            assert!(view.filtered.is_empty());
        }

        #[test]
        fn matches_roles_exactly() {
            let users = users();
            let filter = Filter {
                role: role("Admin"),
                ..Filter::default()
            };

            let view = View::project(&users, &filter, Number::FIRST, size(5));

            assert!(view.filtered.is_empty());
        }

        #[test]
        fn lists_distinct_roles_in_order() {
            let users = users();

            assert_eq!(
                roles(&users),
                [RoleFilter::All, role("admin"), role("user")],
            );

            let none: Vec<User> = Vec::new();
            assert_eq!(roles(&none), [RoleFilter::All]);
        }

        #[test]
        fn paginates_filtered_users() {
            let users = (1..=12)
                .map(|i| {
                    user(&i.to_string(), &format!("U{i}"), "u@x.com", "user")
                })
                .collect::<Vec<_>>();

            let view = View::project(
                &users,
                &Filter::default(),
                Number::new(3).unwrap(),
                size(5),
            );

            assert_eq!(view.page.total_pages, 3);
            assert_eq!(ids(&view.page.items), ["11", "12"]);
            assert_eq!(view.filtered.len(), 12);
            assert!(view.page.is_paginated());
        }

        #[test]
        fn empty_result_has_no_pages() {
            let users = users();
            let filter = Filter {
                search: "nobody".to_owned(),
                ..Filter::default()
            };

            let view = View::project(&users, &filter, Number::FIRST, size(5));

            assert_eq!(view.page.total_pages, 0);
            assert!(view.page.items.is_empty());
            assert!(!view.page.is_paginated());
        }

        #[test]
        fn describes_results() {
            let users = users();
            let search = |term: &str| Filter {
                search: term.to_owned(),
                ..Filter::default()
            };

            let all = View::project(
                &users,
                &Filter::default(),
                Number::FIRST,
                size(5),
            );
            assert_eq!(all.results_label(), "4 results");
            assert_eq!(all.search_hint(), None);
            assert_eq!(all.empty_state(), None);

            let one =
                View::project(&users, &search("bob"), Number::FIRST, size(5));
            assert_eq!(one.results_label(), "1 result");
            assert_eq!(one.search_hint().as_deref(), Some("✅ 1 user found"));

            let many =
                View::project(&users, &search("x.com"), Number::FIRST, size(5));
            assert_eq!(
                many.search_hint().as_deref(),
                Some("✅ 2 users found"),
            );

            let none =
                View::project(&users, &search("zzz"), Number::FIRST, size(5));
            assert_eq!(none.search_hint().as_deref(), Some("❌ No users found"));
            assert_eq!(
                none.empty_state(),
                Some("No users match your search criteria."),
            );

            let empty =
                View::project(&[], &Filter::default(), Number::FIRST, size(5));
            assert_eq!(
                empty.empty_state(),
                Some("No users found. Add one to get started."),
            );
        }

        #[test]
        fn parses_role_filters() {
            assert_eq!("all".parse::<RoleFilter>(), Ok(RoleFilter::All));
            assert_eq!("".parse::<RoleFilter>(), Ok(RoleFilter::All));
            assert_eq!("admin".parse::<RoleFilter>(), Ok(role("admin")));
            assert_eq!(role("admin").to_string(), "admin");
            assert_eq!(RoleFilter::All.to_string(), "all");
        }
    }
}
