//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 문자열 검증과 쿼리 파라미터 파싱
//! - [`display_terminal`] - 기동 시 터미널 출력 포맷팅

pub mod string_utils;
pub mod display_terminal;
