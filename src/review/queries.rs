/// 후기 등록. 이미 작성한 후기면 아무 행도 돌려주지 않는다
pub const INSERT_REVIEW: &str = r#"
    INSERT INTO reviews (writer_id, receiver_id, match_id, star_point, content)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (match_id, writer_id) DO NOTHING
    RETURNING id, writer_id, receiver_id, match_id, star_point, content, create_date
"#;
