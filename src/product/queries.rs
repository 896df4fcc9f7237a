// 삭제된 상품(is_deleted)은 상품 조회에서 제외한다. 예외는 GET_PRODUCT_OWNER 하나.

/// 상품 조회
pub const GET_PRODUCT: &str = r#"
    SELECT id, name, content, user_id, category_id, address_id, is_closed, is_deleted, create_date, update_date
    FROM products
    WHERE id = $1 AND is_deleted = FALSE
"#;

/// 상품 조회 (행 잠금)
pub const LOCK_PRODUCT: &str = r#"
    SELECT id, name, content, user_id, category_id, address_id, is_closed, is_deleted, create_date, update_date
    FROM products
    WHERE id = $1 AND is_deleted = FALSE
    FOR UPDATE
"#;

/// 주소 기준 상품 목록 ($2 카테고리, $3 검색 패턴은 NULL 이면 조건 제외)
pub const LIST_PRODUCTS: &str = r#"
    SELECT p.id, p.name, p.category_id, c.name AS category_name,
           (SELECT pi.image_url FROM product_images pi WHERE pi.product_id = p.id ORDER BY pi.id LIMIT 1) AS thumbnail_url,
           p.is_closed,
           (SELECT COUNT(*) FROM matches m WHERE m.product_id = p.id) AS match_count,
           p.create_date
    FROM products p
    JOIN categories c ON c.id = p.category_id
    WHERE p.address_id = $1
      AND p.is_deleted = FALSE
      AND ($2::BIGINT IS NULL OR p.category_id = $2)
      AND ($3::TEXT IS NULL OR p.name ILIKE $3 ESCAPE '\' OR p.content ILIKE $3 ESCAPE '\')
    ORDER BY p.create_date DESC, p.id DESC
    LIMIT $4 OFFSET $5
"#;

/// 주소 기준 상품 수
pub const COUNT_PRODUCTS: &str = r#"
    SELECT COUNT(*)
    FROM products p
    WHERE p.address_id = $1
      AND p.is_deleted = FALSE
      AND ($2::BIGINT IS NULL OR p.category_id = $2)
      AND ($3::TEXT IS NULL OR p.name ILIKE $3 ESCAPE '\' OR p.content ILIKE $3 ESCAPE '\')
"#;

/// 상품 등록
pub const INSERT_PRODUCT: &str = r#"
    INSERT INTO products (name, content, user_id, category_id, address_id, is_closed, is_deleted)
    VALUES ($1, $2, $3, $4, $5, FALSE, FALSE)
    RETURNING id, name, content, user_id, category_id, address_id, is_closed, is_deleted, create_date, update_date
"#;

/// 상품 수정
pub const UPDATE_PRODUCT: &str = r#"
    UPDATE products
    SET name = $2, content = $3, category_id = $4, update_date = NOW()
    WHERE id = $1 AND is_deleted = FALSE
"#;

/// 상품 삭제 (soft delete)
pub const SOFT_DELETE_PRODUCT: &str =
    "UPDATE products SET is_deleted = TRUE, update_date = NOW() WHERE id = $1 AND is_deleted = FALSE";

/// 상품 마감
pub const CLOSE_PRODUCT: &str =
    "UPDATE products SET is_closed = TRUE, update_date = NOW() WHERE id = $1";

/// 상품 이미지 조회
pub const GET_PRODUCT_IMAGES: &str =
    "SELECT id, image_url, image_key, product_id FROM product_images WHERE product_id = $1 ORDER BY id";

/// 상품 이미지 등록
pub const INSERT_PRODUCT_IMAGE: &str =
    "INSERT INTO product_images (image_url, image_key, product_id) VALUES ($1, $2, $3)";

/// 상품 이미지 전체 삭제
pub const DELETE_PRODUCT_IMAGES: &str =
    "DELETE FROM product_images WHERE product_id = $1 RETURNING image_key";

/// 상품 작성자 조회 (삭제된 상품 포함, 후기 작성자 확인용)
pub const GET_PRODUCT_OWNER: &str = "SELECT user_id FROM products WHERE id = $1";

/// 카테고리 조회
pub const GET_CATEGORY: &str = "SELECT id, name FROM categories WHERE id = $1";

/// 모든 카테고리 조회
pub const GET_ALL_CATEGORIES: &str = "SELECT id, name FROM categories ORDER BY id";
