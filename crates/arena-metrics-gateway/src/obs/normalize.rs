//! Path normalization.
//!
//! Applied to matched route templates, which may still spell identifiers as
//! literals (`/seasons/2024/standings`). Segments that look like identifiers
//! (decimal ids, UUIDs, long hex digests) collapse to `{id}`:
//! `/users/123/matches/9f1c...` -> `/users/{id}/matches/{id}`.

const ID_PLACEHOLDER: &str = "{id}";

pub fn collapse_ids(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for (i, seg) in path.split('/').enumerate() {
        if i > 0 {
            out.push('/');
        }
        if is_id_like(seg) {
            out.push_str(ID_PLACEHOLDER);
        } else {
            out.push_str(seg);
        }
    }
    out
}

fn is_id_like(seg: &str) -> bool {
    if seg.is_empty() {
        return false;
    }
    if seg.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    if is_uuid(seg) {
        return true;
    }
    seg.len() >= 16 && seg.bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_uuid(seg: &str) -> bool {
    seg.len() == 36
        && seg.bytes().enumerate().all(|(i, b)| match i {
            8 | 13 | 18 | 23 => b == b'-',
            _ => b.is_ascii_hexdigit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_segments() {
        assert_eq!(collapse_ids("/users/123"), "/users/{id}");
        assert_eq!(collapse_ids("/tournaments/7/matches/42"), "/tournaments/{id}/matches/{id}");
    }

    #[test]
    fn uuid_and_hex_segments() {
        assert_eq!(
            collapse_ids("/matches/550e8400-e29b-41d4-a716-446655440000/score"),
            "/matches/{id}/score"
        );
        assert_eq!(collapse_ids("/replays/deadbeefdeadbeef00"), "/replays/{id}");
    }

    #[test]
    fn plain_words_untouched() {
        assert_eq!(collapse_ids("/"), "/");
        assert_eq!(collapse_ids("/api/v1/leaderboard"), "/api/v1/leaderboard");
        assert_eq!(collapse_ids("/users/abc123"), "/users/abc123");
        assert_eq!(collapse_ids("/a/"), "/a/");
    }
}
