//! Hypermedia links for HAL-style responses.
//!
//! [`LinkBuilder`] computes the link set for a single user, for the
//! unpaged collection, and for one page of a filtered collection. It is a
//! pure function of its inputs: the public collection URL, the current
//! request's query parameters, and the page being rendered.

use crate::{PageInfo, PageRequest, RosterError, RosterResult};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Query parameter that switches hypermedia on.
pub const HATEOAS_PARAM: &str = "hateoas";

/// Query parameters owned by the paged listing, in serialization order.
const PAGE_PARAMS: [&str; 5] = ["name", "size", "page", "sort", HATEOAS_PARAM];

/// Link relation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    SelfRel,
    First,
    Last,
    Next,
    Prev,
    Create,
    Update,
    Delete,
}

impl Relation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SelfRel => "self",
            Self::First => "first",
            Self::Last => "last",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl FromStr for Relation {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(Self::SelfRel),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "next" => Ok(Self::Next),
            "prev" => Ok(Self::Prev),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(RosterError::validation(format!("Unknown link relation: {}", other))),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Link {
    pub href: String,
}

impl Link {
    #[must_use]
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        Self::new(String::from(url))
    }
}

/// An ordered set of links keyed by relation.
///
/// Serializes as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<(Relation, Link)>);

impl Links {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a link, replacing any existing link with the same relation.
    pub fn push(&mut self, rel: Relation, link: Link) {
        if let Some(slot) = self.0.iter_mut().find(|(r, _)| *r == rel) {
            slot.1 = link;
        } else {
            self.0.push((rel, link));
        }
    }

    #[must_use]
    pub fn get(&self, rel: Relation) -> Option<&Link> {
        self.0.iter().find(|(r, _)| *r == rel).map(|(_, link)| link)
    }

    #[must_use]
    pub fn contains(&self, rel: Relation) -> bool {
        self.get(rel).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Relations in insertion order.
    pub fn relations(&self) -> impl Iterator<Item = Relation> + '_ {
        self.0.iter().map(|(rel, _)| *rel)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Relation, &Link)> {
        self.0.iter().map(|(rel, link)| (*rel, link))
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, link) in &self.0 {
            map.serialize_entry(rel.as_str(), link)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LinksVisitor;

        impl<'de> Visitor<'de> for LinksVisitor {
            type Value = Links;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of relation names to links")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Links, A::Error> {
                let mut links = Links::new();
                while let Some((key, link)) = access.next_entry::<String, Link>()? {
                    let rel = key.parse::<Relation>().map_err(serde::de::Error::custom)?;
                    links.push(rel, link);
                }
                Ok(links)
            }
        }

        deserializer.deserialize_map(LinksVisitor)
    }
}

/// Where a route points, relative to the collection URL.
#[derive(Debug, Clone, Copy)]
enum Target {
    Collection,
    Item,
}

/// One entry of the per-user route table.
#[derive(Debug, Clone, Copy)]
struct Route {
    rel: Relation,
    target: Target,
    hateoas: bool,
}

/// Links attached to every user, in rendering order.
const RESOURCE_ROUTES: [Route; 4] = [
    Route {
        rel: Relation::SelfRel,
        target: Target::Item,
        hateoas: true,
    },
    Route {
        rel: Relation::Create,
        target: Target::Collection,
        hateoas: true,
    },
    Route {
        rel: Relation::Update,
        target: Target::Item,
        hateoas: true,
    },
    Route {
        rel: Relation::Delete,
        target: Target::Item,
        hateoas: false,
    },
];

/// Builds hypermedia links relative to the public collection URL.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    collection: Url,
    query: Vec<(String, String)>,
}

impl LinkBuilder {
    /// Creates a builder for the collection at `collection`, e.g.
    /// `http://localhost:8080/api/v1/users`.
    #[must_use]
    pub fn new(collection: Url) -> Self {
        let mut collection = collection;
        collection.set_query(None);
        collection.set_fragment(None);
        Self {
            collection,
            query: Vec::new(),
        }
    }

    /// Creates a builder from a base URL and the collection path.
    ///
    /// The collection path is appended to any path the base already has, so
    /// `https://host/roster` yields `https://host/roster/api/v1/users`.
    pub fn from_parts(base: &str, collection_path: &str) -> RosterResult<Self> {
        let mut base = Url::parse(base)
            .map_err(|e| RosterError::internal(format!("Invalid base URL '{}': {}", base, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let relative = collection_path.trim_start_matches('/');
        let collection = base.join(relative).map_err(|e| {
            RosterError::internal(format!(
                "Cannot resolve collection path '{}': {}",
                collection_path, e
            ))
        })?;
        Ok(Self::new(collection))
    }

    /// Remembers the current request's query parameters so that page links
    /// can carry the ones they do not own.
    #[must_use]
    pub fn with_query<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// The collection URL links are resolved against.
    #[must_use]
    pub const fn collection(&self) -> &Url {
        &self.collection
    }

    /// Links for a single user: self, create, update, delete.
    pub fn resource_links(&self, id: &str) -> RosterResult<Links> {
        let mut links = Links::new();
        for route in &RESOURCE_ROUTES {
            let mut url = match route.target {
                Target::Collection => self.collection.clone(),
                Target::Item => self.item_url(id)?,
            };
            if route.hateoas {
                url.query_pairs_mut().append_pair(HATEOAS_PARAM, "true");
            }
            links.push(route.rel, url.into());
        }
        Ok(links)
    }

    /// The collection-level self link of the unpaged listing.
    #[must_use]
    pub fn collection_links(&self) -> Links {
        let mut url = self.collection.clone();
        url.query_pairs_mut().append_pair(HATEOAS_PARAM, "true");
        let mut links = Links::new();
        links.push(Relation::SelfRel, url.into());
        links
    }

    /// Navigation links for one page of the filtered listing.
    ///
    /// Always yields self, first and last; next and prev only when such a
    /// page exists.
    pub fn page_links(
        &self,
        filter: &str,
        request: &PageRequest,
        info: &PageInfo,
    ) -> RosterResult<Links> {
        let last_page = info.last_page();
        let current = info.page as u64;

        let mut links = Links::new();
        links.push(Relation::SelfRel, self.page_url(filter, request, current)?.into());
        links.push(Relation::First, self.page_url(filter, request, 0)?.into());
        links.push(Relation::Last, self.page_url(filter, request, last_page)?.into());
        if info.has_next() {
            links.push(Relation::Next, self.page_url(filter, request, current + 1)?.into());
        }
        if info.has_previous() {
            links.push(Relation::Prev, self.page_url(filter, request, current - 1)?.into());
        }
        Ok(links)
    }

    fn item_url(&self, id: &str) -> RosterResult<Url> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RosterError::internal(format!("Cannot build item link from '{}'", self.collection))
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    fn page_url(&self, filter: &str, request: &PageRequest, page: u64) -> RosterResult<Url> {
        let mut url = self.item_url("paged")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("name", filter)
                .append_pair("size", &request.size.to_string())
                .append_pair("page", &page.to_string())
                .append_pair("sort", &request.sort.to_string())
                .append_pair(HATEOAS_PARAM, "true");
            for (key, value) in &self.query {
                if !PAGE_PARAMS.contains(&key.as_str()) {
                    pairs.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sort, SortDirection, SortField};

    const ID: &str = "1e1f3e26-9b01-4d7d-a123-123456789001";

    fn builder() -> LinkBuilder {
        LinkBuilder::from_parts("http://localhost:8080", "/api/v1/users").unwrap()
    }

    fn href(links: &Links, rel: Relation) -> &str {
        &links.get(rel).unwrap().href
    }

    #[test]
    fn test_resource_links() {
        let links = builder().resource_links(ID).unwrap();
        let rels: Vec<_> = links.relations().collect();
        assert_eq!(
            rels,
            vec![Relation::SelfRel, Relation::Create, Relation::Update, Relation::Delete]
        );
        assert_eq!(
            href(&links, Relation::SelfRel),
            format!("http://localhost:8080/api/v1/users/{}?hateoas=true", ID)
        );
        assert_eq!(
            href(&links, Relation::Create),
            "http://localhost:8080/api/v1/users?hateoas=true"
        );
        assert_eq!(
            href(&links, Relation::Update),
            format!("http://localhost:8080/api/v1/users/{}?hateoas=true", ID)
        );
        assert_eq!(
            href(&links, Relation::Delete),
            format!("http://localhost:8080/api/v1/users/{}", ID)
        );
    }

    #[test]
    fn test_resource_links_are_idempotent() {
        let builder = builder();
        assert_eq!(
            builder.resource_links(ID).unwrap(),
            builder.resource_links(ID).unwrap()
        );
    }

    #[test]
    fn test_trailing_slash_collection() {
        let builder = LinkBuilder::from_parts("http://localhost:8080", "/api/v1/users/").unwrap();
        let links = builder.resource_links(ID).unwrap();
        assert_eq!(
            href(&links, Relation::Delete),
            format!("http://localhost:8080/api/v1/users/{}", ID)
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        for base in ["https://host/roster", "https://host/roster/"] {
            let builder = LinkBuilder::from_parts(base, "/api/v1/users").unwrap();
            assert_eq!(builder.collection().as_str(), "https://host/roster/api/v1/users");
            let links = builder.resource_links(ID).unwrap();
            assert_eq!(
                href(&links, Relation::SelfRel),
                format!("https://host/roster/api/v1/users/{}?hateoas=true", ID)
            );
        }
    }

    #[test]
    fn test_unresolvable_collection_is_an_error() {
        let builder = LinkBuilder::new(Url::parse("mailto:roster@example.com").unwrap());
        let err = builder.resource_links(ID).unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(LinkBuilder::from_parts("not a url", "/api/v1/users").is_err());
    }

    #[test]
    fn test_collection_links() {
        let links = builder().collection_links();
        assert_eq!(links.len(), 1);
        assert_eq!(
            href(&links, Relation::SelfRel),
            "http://localhost:8080/api/v1/users?hateoas=true"
        );
    }

    #[test]
    fn test_first_page_links() {
        let request = PageRequest::new(0, 5);
        let info = PageInfo::new(0, 5, 20, 5);
        let links = builder().page_links("", &request, &info).unwrap();

        let rels: Vec<_> = links.relations().collect();
        assert_eq!(
            rels,
            vec![Relation::SelfRel, Relation::First, Relation::Last, Relation::Next]
        );
        assert_eq!(
            href(&links, Relation::SelfRel),
            "http://localhost:8080/api/v1/users/paged?name=&size=5&page=0&sort=name%2Casc&hateoas=true"
        );
        assert_eq!(
            href(&links, Relation::Last),
            "http://localhost:8080/api/v1/users/paged?name=&size=5&page=3&sort=name%2Casc&hateoas=true"
        );
        assert_eq!(
            href(&links, Relation::Next),
            "http://localhost:8080/api/v1/users/paged?name=&size=5&page=1&sort=name%2Casc&hateoas=true"
        );
    }

    #[test]
    fn test_middle_page_links() {
        let request = PageRequest::new(2, 5).with_sort(Sort::new(SortField::Age, SortDirection::Desc));
        let info = PageInfo::new(2, 5, 20, 5);
        let links = builder().page_links("al", &request, &info).unwrap();

        let rels: Vec<_> = links.relations().collect();
        assert_eq!(
            rels,
            vec![
                Relation::SelfRel,
                Relation::First,
                Relation::Last,
                Relation::Next,
                Relation::Prev
            ]
        );
        assert_eq!(
            href(&links, Relation::Prev),
            "http://localhost:8080/api/v1/users/paged?name=al&size=5&page=1&sort=age%2Cdesc&hateoas=true"
        );
        assert_eq!(
            href(&links, Relation::First),
            "http://localhost:8080/api/v1/users/paged?name=al&size=5&page=0&sort=age%2Cdesc&hateoas=true"
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let request = PageRequest::new(3, 5);
        let info = PageInfo::new(3, 5, 20, 5);
        let links = builder().page_links("", &request, &info).unwrap();
        assert!(!links.contains(Relation::Next));
        assert!(links.contains(Relation::Prev));
    }

    #[test]
    fn test_empty_result_links() {
        let request = PageRequest::new(0, 20);
        let info = PageInfo::new(0, 20, 0, 0);
        let links = builder().page_links("nobody", &request, &info).unwrap();
        let rels: Vec<_> = links.relations().collect();
        assert_eq!(rels, vec![Relation::SelfRel, Relation::First, Relation::Last]);
        assert_eq!(href(&links, Relation::First), href(&links, Relation::Last));
    }

    #[test]
    fn test_extra_query_parameters_follow_owned_ones() {
        let request = PageRequest::new(0, 5);
        let info = PageInfo::new(0, 5, 5, 5);
        let builder = builder().with_query(vec![
            ("page", "0"),
            ("lang", "en"),
            ("hateoas", "true"),
            ("view", "full"),
        ]);
        let links = builder.page_links("", &request, &info).unwrap();
        assert_eq!(
            href(&links, Relation::SelfRel),
            "http://localhost:8080/api/v1/users/paged?name=&size=5&page=0&sort=name%2Casc&hateoas=true&lang=en&view=full"
        );
    }

    #[test]
    fn test_links_serialize_in_insertion_order() {
        let mut links = Links::new();
        links.push(Relation::SelfRel, Link::new("http://a/self"));
        links.push(Relation::Delete, Link::new("http://a/delete"));
        links.push(Relation::Create, Link::new("http://a/create"));
        let json = serde_json::to_string(&links).unwrap();
        assert_eq!(
            json,
            r#"{"self":{"href":"http://a/self"},"delete":{"href":"http://a/delete"},"create":{"href":"http://a/create"}}"#
        );

        let back: Links = serde_json::from_str(&json).unwrap();
        assert_eq!(back, links);
    }

    #[test]
    fn test_push_replaces_existing_relation() {
        let mut links = Links::new();
        links.push(Relation::SelfRel, Link::new("http://a/1"));
        links.push(Relation::SelfRel, Link::new("http://a/2"));
        assert_eq!(links.len(), 1);
        assert_eq!(links.get(Relation::SelfRel).unwrap().href, "http://a/2");
    }
}
