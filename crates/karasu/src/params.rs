use crate::error::{Error, Result};
use indexmap::IndexMap;
use smol_str::{format_smolstr, SmolStr};
use strum::{Display, EnumString, IntoStaticStr};
use typed_builder::TypedBuilder;

/// Rendering mode the endpoints are asked for
///
/// `extended` delivers the untruncated tweet text in the `full_text` field,
/// `compat` the pre-280-character representation
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum TweetMode {
    Compat,
    #[default]
    Extended,
}

/// Category of objects a search should return
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, IntoStaticStr, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum ResultFilter {
    #[default]
    Default,
    Image,
    Video,
    User,
}

impl From<ResultFilter> for SmolStr {
    fn from(value: ResultFilter) -> Self {
        SmolStr::new_static(value.into())
    }
}

/// Page size argument
///
/// The endpoint expects an integer, but the argument is also accepted in
/// string form and only checked when the query is assembled. Whitespace or
/// non-digit input is reported as [`Error::InvalidCount`] at that point.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Count(SmolStr);

impl Count {
    fn parse(&self) -> Result<u32> {
        self.0
            .parse()
            .map_err(|_| Error::InvalidCount(self.0.clone()))
    }
}

impl From<u32> for Count {
    fn from(value: u32) -> Self {
        Self(format_smolstr!("{value}"))
    }
}

impl From<i32> for Count {
    fn from(value: i32) -> Self {
        Self(format_smolstr!("{value}"))
    }
}

impl From<&str> for Count {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for Count {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<SmolStr> for Count {
    fn from(value: SmolStr) -> Self {
        Self(value)
    }
}

/// Parameters accepted by the search endpoints
///
/// All fields are optional. `term` and the `min_*`/`lang`/`since`/`until`
/// modifiers are folded into the `q` operator expression, `raw_query`
/// sidesteps that construction entirely
#[derive(Clone, Debug, Default, TypedBuilder)]
pub struct SearchParams {
    /// Search keywords, used verbatim as the leading part of `q`
    #[builder(default, setter(into, strip_option))]
    pub(crate) term: Option<String>,

    /// Complete query string to send instead of the assembled one.
    ///
    /// Everything but `tweet_mode` is taken from it verbatim; the other
    /// builder arguments no longer reach the wire
    #[builder(default, setter(into, strip_option))]
    pub(crate) raw_query: Option<String>,

    #[builder(default, setter(into, strip_option))]
    pub(crate) count: Option<Count>,

    /// Only match tweets with at least this many replies
    #[builder(default, setter(strip_option))]
    pub(crate) min_replies: Option<u64>,

    /// Only match tweets with at least this many likes
    #[builder(default, setter(strip_option))]
    pub(crate) min_faves: Option<u64>,

    /// Only match tweets with at least this many retweets
    #[builder(default, setter(strip_option))]
    pub(crate) min_retweets: Option<u64>,

    /// BCP 47 language tag, e.g. `en` or `ja`
    #[builder(default, setter(into, strip_option))]
    pub(crate) lang: Option<SmolStr>,

    /// Only match tweets posted before this `YYYY-MM-DD` date
    #[builder(default, setter(into, strip_option))]
    pub(crate) until: Option<SmolStr>,

    /// Only match tweets posted after this `YYYY-MM-DD` date
    #[builder(default, setter(into, strip_option))]
    pub(crate) since: Option<SmolStr>,

    /// Checked against [`ResultFilter`] when the query is assembled.
    /// The check is case-sensitive, `Image` is rejected
    #[builder(default, setter(into, strip_option))]
    pub(crate) result_filter: Option<SmolStr>,

    /// Attach the author record to every returned tweet
    #[builder(default)]
    pub(crate) expand_user: bool,
}

/// Validated and serialised form of [`SearchParams`]
pub(crate) struct PreparedSearch {
    pub(crate) query: String,
    pub(crate) result_filter: ResultFilter,
}

impl SearchParams {
    /// Validate the parameters and assemble the query string
    ///
    /// Returns `None` when neither a term nor a raw query is present, in
    /// which case no request is supposed to go out at all
    pub(crate) fn prepare(&self, tweet_mode: TweetMode) -> Result<Option<PreparedSearch>> {
        if self.term.is_none() && self.raw_query.is_none() {
            return Ok(None);
        }

        let count = self.count.as_ref().map(Count::parse).transpose()?;
        let result_filter = self.parsed_result_filter()?;

        let mut query_params: IndexMap<SmolStr, SmolStr> = IndexMap::new();
        if let Some(raw_query) = &self.raw_query {
            let pairs: Vec<(SmolStr, SmolStr)> = serde_urlencoded::from_str(raw_query)?;
            query_params.extend(pairs);
        } else {
            query_params.insert(SmolStr::new_static("q"), self.operator_query());

            if let Some(count) = count {
                query_params.insert(SmolStr::new_static("count"), format_smolstr!("{count}"));
            }
            if let Some(result_filter) = result_filter {
                query_params.insert(SmolStr::new_static("result_filter"), result_filter.into());
            }
        }

        query_params
            .entry(SmolStr::new_static("tweet_mode"))
            .or_insert_with(|| SmolStr::new_static(tweet_mode.into()));

        Ok(Some(PreparedSearch {
            query: serde_urlencoded::to_string(&query_params)?,
            result_filter: result_filter.unwrap_or_default(),
        }))
    }

    /// Fold the term and the search modifiers into a single `q` expression
    ///
    /// The modifiers follow the term in a fixed order
    fn operator_query(&self) -> SmolStr {
        let mut clauses: Vec<String> = Vec::new();

        if let Some(term) = &self.term {
            clauses.push(term.clone());
        }
        if let Some(min_replies) = self.min_replies {
            clauses.push(format!("min_replies:{min_replies}"));
        }
        if let Some(min_faves) = self.min_faves {
            clauses.push(format!("min_faves:{min_faves}"));
        }
        if let Some(min_retweets) = self.min_retweets {
            clauses.push(format!("min_retweets:{min_retweets}"));
        }
        if let Some(lang) = &self.lang {
            clauses.push(format!("lang:{lang}"));
        }
        if let Some(until) = &self.until {
            clauses.push(format!("until:{until}"));
        }
        if let Some(since) = &self.since {
            clauses.push(format!("since:{since}"));
        }

        clauses.join(" ").into()
    }

    fn parsed_result_filter(&self) -> Result<Option<ResultFilter>> {
        self.result_filter
            .as_ref()
            .map(|raw| {
                raw.parse()
                    .map_err(|_| Error::UnknownResultFilter(raw.clone()))
            })
            .transpose()
    }
}
