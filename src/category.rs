use crate::Error;

macro_rules! declare_categories {
    ($($variant: ident: $name: literal),* $(,)?) => {
        /// Holiday categories a country may support.
        ///
        /// Every country supports [`Category::Public`], which is also the
        /// default selection.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Category {$(
            #[doc = $name]
            $variant
        ),*}

        impl Category {
            pub const ALL: &[Category] = &[$(Category::$variant),*];

            pub const fn as_str(&self) -> &'static str {
                match self {$(
                    Category::$variant => $name
                ),*}
            }
        }

        impl std::str::FromStr for Category {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s {
                    $($name => Category::$variant,)*
                    _ => return Err(Error::CategoryNotAvailable),
                })
            }
        }
    };
}

declare_categories![
    Public: "public",
    Armenian: "armenian",
    Bank: "bank",
    Catholic: "catholic",
    Government: "government",
    HalfDay: "half_day",
    Hebrew: "hebrew",
    Islamic: "islamic",
    Optional: "optional",
    School: "school",
    Unofficial: "unofficial",
    Workday: "workday",
];

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
