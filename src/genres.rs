//! Maps user-entered genre names (English or Chinese) to TMDB TV genre ids.
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct Genre {
    pub id: u32,
    pub english_name: &'static str,
    pub chinese_name: &'static str,
}

/// TMDB TV genres, see https://developer.themoviedb.org/reference/genre-tv-list
pub const GENRES: &[Genre] = &[
    Genre { id: 10759, english_name: "Action & Adventure", chinese_name: "动作冒险" },
    Genre { id: 16, english_name: "Animation", chinese_name: "动画" },
    Genre { id: 35, english_name: "Comedy", chinese_name: "喜剧" },
    Genre { id: 80, english_name: "Crime", chinese_name: "犯罪" },
    Genre { id: 99, english_name: "Documentary", chinese_name: "纪录" },
    Genre { id: 18, english_name: "Drama", chinese_name: "剧情" },
    Genre { id: 10751, english_name: "Family", chinese_name: "家庭" },
    Genre { id: 10762, english_name: "Kids", chinese_name: "儿童" },
    Genre { id: 9648, english_name: "Mystery", chinese_name: "悬疑" },
    Genre { id: 10763, english_name: "News", chinese_name: "新闻" },
    Genre { id: 10764, english_name: "Reality", chinese_name: "真人秀" },
    Genre { id: 10765, english_name: "Sci-Fi & Fantasy", chinese_name: "科幻奇幻" },
    Genre { id: 10766, english_name: "Soap", chinese_name: "肥皂剧" },
    Genre { id: 10767, english_name: "Talk", chinese_name: "脱口秀" },
    Genre { id: 10768, english_name: "War & Politics", chinese_name: "战争政治" },
    Genre { id: 37, english_name: "Western", chinese_name: "西部" },
];

static ALIASES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("action", 10759),
        ("adventure", 10759),
        ("cartoon", 16),
        ("funny", 35),
        ("detective story", 80),
        ("crime story", 80),
        ("docs", 99),
        ("doc", 99),
        ("family show", 10751),
        ("children", 10762),
        ("mystery", 9648),
        ("detective", 9648),
        ("news show", 10763),
        ("science fiction", 10765),
        ("fantasy", 10765),
        ("scifi", 10765),
        ("sci-fi", 10765),
        ("talk show", 10767),
        ("politics", 10768),
        ("war", 10768),
        ("动作", 10759),
        ("冒险", 10759),
        ("卡通", 16),
        ("搞笑", 35),
        ("幽默", 35),
        ("侦探", 80),
        ("罪案", 80),
        ("纪实", 99),
        ("纪录片", 99),
        ("温情", 18),
        ("家庭剧", 10751),
        ("少儿", 10762),
        ("推理", 9648),
        ("新闻节目", 10763),
        ("综艺", 10764),
        ("科幻", 10765),
        ("奇幻", 10765),
        ("魔幻", 10765),
        ("脱口秀节目", 10767),
        ("访谈", 10767),
        ("战争", 10768),
        ("政治", 10768),
    ])
});

/// Resolves a genre name to its TMDB id.
///
/// Tries the alias table, then an exact match on the canonical names, then
/// substring containment in either direction. Blank input never matches.
pub fn resolve_genre(name: &str) -> Option<u32> {
    let normalized = name.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if let Some(id) = ALIASES.get(normalized.as_str()) {
        return Some(*id);
    }

    let exact = GENRES.iter().find(|g| {
        g.english_name.to_lowercase() == normalized || g.chinese_name == normalized
    });
    if let Some(genre) = exact {
        return Some(genre.id);
    }

    GENRES
        .iter()
        .find(|g| {
            let english = g.english_name.to_lowercase();
            english.contains(&normalized)
                || normalized.contains(&english)
                || g.chinese_name.contains(normalized.as_str())
                || normalized.contains(g.chinese_name)
        })
        .map(|g| g.id)
}

/// Chinese display name for a genre id.
pub fn genre_name_by_id(id: u32) -> Option<&'static str> {
    GENRES.iter().find(|g| g.id == id).map(|g| g.chinese_name)
}
