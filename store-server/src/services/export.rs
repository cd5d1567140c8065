//! 用户导出
//!
//! 生成用户清单的 xlsx 工作簿 ("Users" 工作表)，
//! 以字节流返回，接口层再做 base64 封装。

use rust_xlsxwriter::Workbook;
use shared::models::User;

use crate::utils::AppError;

const HEADERS: [&str; 5] = ["ID", "Name", "Email", "Role", "Created At"];

/// 构建用户导出工作簿并返回 xlsx 字节
pub fn users_workbook(users: &[User]) -> Result<Vec<u8>, AppError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Users").map_err(to_app_error)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(to_app_error)?;
    }

    for (i, user) in users.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet
            .write_string(row, 0, &user.id)
            .map_err(to_app_error)?;
        worksheet
            .write_string(row, 1, &user.name)
            .map_err(to_app_error)?;
        worksheet
            .write_string(row, 2, &user.email)
            .map_err(to_app_error)?;
        worksheet
            .write_string(row, 3, user.role.as_str())
            .map_err(to_app_error)?;
        worksheet
            .write_string(row, 4, user.created_at.to_rfc3339())
            .map_err(to_app_error)?;
    }

    workbook.save_to_buffer().map_err(to_app_error)
}

fn to_app_error(err: rust_xlsxwriter::XlsxError) -> AppError {
    AppError::internal(format!("Workbook generation failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::Role;

    #[test]
    fn test_workbook_is_nonempty_xlsx() {
        let users = vec![User {
            id: "u1".to_string(),
            email: "a@example.com".to_string(),
            name: "A".to_string(),
            role: Role::Owner,
            created_at: Utc::now(),
            profile_photo: None,
            updated_at: None,
        }];

        let bytes = users_workbook(&users).expect("workbook");
        // xlsx 是 zip 容器，以 PK 魔数开头
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }
}
