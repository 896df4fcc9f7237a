use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_STAR_POINT: i16 = 5;

// 후기 모델
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub writer_id: i64,
    pub receiver_id: i64,
    pub match_id: i64,
    pub star_point: i16,
    pub content: String,
    pub create_date: DateTime<Utc>,
}

/// 거래 상대 평가 요청
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub star_point: i16,
    #[serde(default)]
    pub content: String,
}

impl ReviewRequest {
    /// 별점을 남긴 경우에만 후기를 저장한다
    pub fn has_rating(&self) -> bool {
        self.star_point != 0
    }

    pub fn is_valid(&self) -> bool {
        (0..=MAX_STAR_POINT).contains(&self.star_point)
    }
}

/// 매칭의 작성자 기준 상대방. 나눔한 사람은 받은 사람을, 받은 사람은 나눔한 사람을 평가한다.
pub fn resolve_receiver(writer_id: i64, owner_id: i64, applicant_id: i64) -> Option<i64> {
    if writer_id == owner_id {
        Some(applicant_id)
    } else if writer_id == applicant_id {
        Some(owner_id)
    } else {
        None
    }
}
