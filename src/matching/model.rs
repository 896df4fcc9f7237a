use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 상품당 최대 신청 인원
pub const MAX_APPLICANTS: i64 = 3;

pub const APPLIED_MESSAGE: &str = "신청 되었습니다.";
pub const FULL_MESSAGE: &str = "인원이 다 찼습니다.";

// 나눔 신청(매칭) 모델. receiver_id 는 신청자
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Match {
    pub id: i64,
    pub product_id: i64,
    pub receiver_id: i64,
    pub is_matching: bool,
    pub create_date: DateTime<Utc>,
}

/// 상품별 신청자 목록 항목
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MatchApplicant {
    pub user_id: i64,
    pub user_nickname: String,
    pub profile_url: Option<String>,
    pub match_id: i64,
    pub product_id: i64,
    pub create_date: DateTime<Utc>,
}

/// 신청 결과. 인원 초과는 오류가 아닌 실패 결과로 돌려준다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub result: bool,
    pub result_message: String,
    pub match_id: Option<i64>,
}

impl MatchResult {
    pub fn applied(match_id: i64) -> Self {
        Self {
            result: true,
            result_message: APPLIED_MESSAGE.to_string(),
            match_id: Some(match_id),
        }
    }

    pub fn full() -> Self {
        Self {
            result: false,
            result_message: FULL_MESSAGE.to_string(),
            match_id: None,
        }
    }
}

/// 기존 신청 수에 따른 신청 처리 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// 신청 후에도 모집 중
    Open,
    /// 마지막 자리. 신청과 함께 상품 마감
    Closing,
    /// 정원 초과. 신청 불가
    Full,
}

impl Admission {
    pub fn for_count(existing: i64) -> Self {
        if existing >= MAX_APPLICANTS {
            Admission::Full
        } else if existing == MAX_APPLICANTS - 1 {
            Admission::Closing
        } else {
            Admission::Open
        }
    }
}
