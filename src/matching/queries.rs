/// 상품별 신청 수
pub const COUNT_MATCHES_BY_PRODUCT: &str = "SELECT COUNT(*) FROM matches WHERE product_id = $1";

/// 신청 등록
pub const INSERT_MATCH: &str = r#"
    INSERT INTO matches (product_id, receiver_id, is_matching)
    VALUES ($1, $2, FALSE)
    RETURNING id, product_id, receiver_id, is_matching, create_date
"#;

/// 신청 조회
pub const GET_MATCH: &str =
    "SELECT id, product_id, receiver_id, is_matching, create_date FROM matches WHERE id = $1";

/// 상품별 먼저 신청한 3명
pub const GET_MATCH_LIST_BY_PRODUCT: &str = r#"
    SELECT users.id AS user_id,
           users.nickname AS user_nickname,
           users.profile_url AS profile_url,
           matches.id AS match_id,
           matches.product_id AS product_id,
           matches.create_date AS create_date
    FROM users
    JOIN matches ON users.id = matches.receiver_id
    WHERE matches.product_id = $1
    ORDER BY matches.create_date ASC, matches.id ASC
    LIMIT 3
"#;

/// 두 회원 사이의 확정된 매칭
pub const GET_ACTIVE_MATCH_BETWEEN: &str = r#"
    SELECT id, product_id, receiver_id, is_matching, create_date
    FROM matches
    WHERE product_id = $1
      AND (receiver_id = $2 OR receiver_id = $3)
      AND is_matching = TRUE
"#;

/// 상품의 확정된 매칭
pub const GET_ACTIVE_MATCH_BY_PRODUCT: &str = r#"
    SELECT id, product_id, receiver_id, is_matching, create_date
    FROM matches
    WHERE product_id = $1 AND is_matching = TRUE
    LIMIT 1
"#;

/// 매칭 확정
pub const CONFIRM_MATCH: &str = "UPDATE matches SET is_matching = TRUE WHERE id = $1";
