/// 회원 조회
pub const GET_USER: &str = "SELECT id, provider, provider_account_id, nickname, profile_url, address_id, create_date FROM users WHERE id = $1";

/// 소셜 계정으로 회원 조회
pub const GET_USER_BY_PROVIDER_ACCOUNT: &str = "SELECT id, provider, provider_account_id, nickname, profile_url, address_id, create_date FROM users WHERE provider = $1 AND provider_account_id = $2";

/// 회원 생성 또는 프로필 갱신
pub const UPSERT_USER: &str = r#"
    INSERT INTO users (provider, provider_account_id, nickname, profile_url)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (provider, provider_account_id)
    DO UPDATE SET nickname = EXCLUDED.nickname, profile_url = EXCLUDED.profile_url
    RETURNING id, provider, provider_account_id, nickname, profile_url, address_id, create_date
"#;

/// 회원 주소 변경
pub const UPDATE_USER_ADDRESS: &str = "UPDATE users SET address_id = $2 WHERE id = $1 RETURNING id, provider, provider_account_id, nickname, profile_url, address_id, create_date";

/// 주소 조회
pub const GET_ADDRESS: &str = "SELECT id, region_code, name FROM addresses WHERE id = $1";

/// 주소 생성 (지역 코드 기준)
pub const UPSERT_ADDRESS: &str = r#"
    INSERT INTO addresses (region_code, name)
    VALUES ($1, $2)
    ON CONFLICT (region_code)
    DO UPDATE SET name = CASE WHEN EXCLUDED.name = '' THEN addresses.name ELSE EXCLUDED.name END
    RETURNING id, region_code, name
"#;
