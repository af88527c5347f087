//! # 문자열 유틸리티
//!
//! 요청 값 정리와 쿼리 파라미터 파싱에 쓰이는 공통 함수들입니다.

use crate::core::errors::AppError;

/// 필수 문자열의 앞뒤 공백을 제거하고, 비어 있으면 검증 에러를 반환합니다.
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{}은(는) 필수입니다",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// `"1,2,3"` 형태의 쉼표 구분 ID 목록을 파싱합니다.
///
/// 빈 항목은 건너뛰며, 숫자가 아닌 항목이 있으면 검증 에러를 반환합니다.
pub fn parse_id_list(value: &str, field_name: &str) -> Result<Vec<i64>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                AppError::ValidationError(format!(
                    "{}에 잘못된 ID가 포함되어 있습니다: {}",
                    field_name, part
                ))
            })
        })
        .collect()
}

/// `0`/`1`, `true`/`false` 형태의 쿼리 플래그를 해석합니다.
///
/// 해석할 수 없는 값은 `false`로 취급합니다.
pub fn parse_flag(value: &str) -> bool {
    match value.trim().parse::<i64>() {
        Ok(number) => number != 0,
        Err(_) => matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes"),
    }
}
