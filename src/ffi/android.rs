use crate::core::matcher;
use jni::objects::{JObject, JString};
use jni::sys::{jboolean, jint, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

/// Backs `external fun isDateInMonth(date: String, selectedDay: Int, selectedMonth: Int, selectedYear: Int): Boolean`
/// on `com.mxrph.financik.HistoryActivity`.
#[no_mangle]
pub extern "system" fn Java_com_mxrph_financik_HistoryActivity_isDateInMonth(
    mut env: JNIEnv,
    _this: JObject,
    date: JString,
    selected_day: jint,
    selected_month: jint,
    selected_year: jint,
) -> jboolean {
    let date: String = match env.get_string(&date) {
        Ok(date) => date.into(),
        Err(e) => {
            tracing::warn!("Could not read date string from the JVM: {}", e);
            return JNI_FALSE;
        }
    };

    if matcher::matches(&date, selected_day, selected_month, selected_year) {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}
