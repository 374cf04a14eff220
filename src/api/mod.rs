pub mod attendance;
pub mod reports;
pub mod students;

use actix_web::HttpResponse;
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};

use crate::export::XLSX_MIME;

/// Wraps workbook bytes as a downloadable attachment.
pub(crate) fn xlsx_attachment(bytes: Vec<u8>, filename: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: filename_params(filename),
        })
        .body(bytes)
}

/// A plain `filename`, plus a UTF-8 `filename*` when the name is not ASCII.
fn filename_params(filename: String) -> Vec<DispositionParam> {
    if filename.is_ascii() {
        return vec![DispositionParam::Filename(filename)];
    }
    let fallback = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    vec![
        DispositionParam::Filename(fallback),
        DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: filename.into_bytes(),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_get_a_single_parameter() {
        assert_eq!(
            filename_params("student_list.xlsx".into()),
            vec![DispositionParam::Filename("student_list.xlsx".into())]
        );
    }

    #[test]
    fn non_ascii_names_carry_an_extended_value() {
        let params = filename_params("student_list_search_Åsa.xlsx".into());
        assert_eq!(
            params[0],
            DispositionParam::Filename("student_list_search__sa.xlsx".into())
        );
        match &params[1] {
            DispositionParam::FilenameExt(ext) => {
                assert_eq!(ext.value, "student_list_search_Åsa.xlsx".as_bytes());
                assert_eq!(ext.charset, Charset::Ext("UTF-8".into()));
            }
            other => panic!("expected filename*, got {other:?}"),
        }
    }
}
