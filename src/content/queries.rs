//! GraphQL documents sent to the CMS

macro_rules! image_fields {
    () => {
        "featuredImage { node { mediaItemUrl sourceUrl altText srcSet mediaDetails { height width } } }"
    };
}

macro_rules! post_fields {
    () => {
        concat!(
            "id title date slug uri excerpt content commentCount ",
            "categories { nodes { name uri slug } } ",
            "terms { nodes { name slug uri } } ",
            image_fields!()
        )
    };
}

pub const NAV_MENU: &str = "{ menuItems(where: {location: HEADER_MENU}) { nodes { \
    text: label parentId href: uri childItems { nodes { text: label href: uri } } } } }";

pub const NODE_BY_URI: &str = concat!(
    "query GetNodeByURI($uri: String!) { nodeByUri(uri: $uri) { __typename ",
    "... on Post { ", post_fields!(), " } ",
    "... on Page { id title date uri content ", image_fields!(), " } ",
    "... on Category { id name posts { nodes { ", post_fields!(), " } } } ",
    "} }"
);

pub const ALL_URIS: &str = "query GetAllUris($after: String) { \
    posts(first: 50, after: $after) { pageInfo { hasNextPage endCursor } nodes { uri } } \
    pages { nodes { uri } } }";

pub const LATEST_POSTS: &str = concat!("{ posts(first: 8) { nodes { ", post_fields!(), " } } }");

pub const NEWS_POSTS: &str = concat!(
    "query Posts($after: String) { posts(first: 50, after: $after) { ",
    "pageInfo { hasNextPage endCursor } nodes { ", post_fields!(), " } } }"
);

pub const TEAM_MEMBERS: &str = "{ equipes(where: {status: PUBLISH}, first: 100) { nodes { \
    featuredImage { node { altText mediaItemUrl } } title \
    fonctions { equipe fonction } social { facebook instagram linkedin twitter } } } }";

pub const POSTS_BY_CATEGORY: &str = concat!(
    "query PostsByCategory($category: String!, $first: Int!) { ",
    "posts(where: {categoryName: $category, status: PUBLISH}, first: $first) { nodes { ",
    post_fields!(),
    " } } }"
);

pub const LATEST_BY_CATEGORY: &str = concat!(
    "query LatestByCategory($category: String!, $limit: Int!) { ",
    "posts(first: $limit, where: {categoryName: $category, status: PUBLISH, ",
    "orderby: {field: DATE, order: DESC}}) { nodes { ",
    post_fields!(),
    " } } }"
);

pub const PODCAST_POSTS: &str = concat!(
    "{ posts(where: {categoryName: \"Podcast\"}, first: 20) { nodes { ",
    post_fields!(),
    " podcast { type } } } }"
);

pub const REALISATION_BY_SLUG: &str = concat!(
    "query GetRealisationBySlug($slug: ID!) { post(id: $slug, idType: SLUG) { ",
    post_fields!(),
    " } }"
);

pub const FORMATIONS: &str = concat!(
    "{ posts(where: {categoryName: \"Formations\", status: PUBLISH}, first: 100) { nodes { ",
    "slug title formation { nom description lieu date prix statut duree formateur profession places ",
    "lien { url title target } } ",
    image_fields!(),
    " } } }"
);

pub const MAGAZINES: &str = concat!(
    "{ posts(where: {categoryName: \"Magazine\", status: PUBLISH}, first: 100) { nodes { ",
    "slug magazine { titre description date fichier { node { mediaItemUrl altText } } } ",
    image_fields!(),
    " } } }"
);
