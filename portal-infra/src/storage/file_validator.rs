use super::naming::split_file_name;
use indexmap::IndexSet;

/// 默认单文件大小上限：50MB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// 文件校验器
#[derive(Debug, Clone)]
pub struct FileValidator {
    /// 允许的文件扩展名集合（小写，不含点），保持插入顺序以便提示
    allowed_extensions: IndexSet<String>,
    /// 文件大小上限（字节）
    max_size: u64,
}

impl FileValidator {
    /// 创建新的验证器
    pub fn new() -> Self {
        Self {
            allowed_extensions: IndexSet::new(),
            max_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// 添加允许的文件扩展名
    pub fn allow_extension(mut self, ext: impl Into<String>) -> Self {
        let ext = ext.into();
        self.allowed_extensions
            .insert(ext.trim_start_matches('.').to_lowercase());
        self
    }

    /// 添加常见的文档类型
    pub fn allow_documents(self) -> Self {
        ["pdf", "doc", "docx", "ppt", "pptx"]
            .into_iter()
            .fold(self, Self::allow_extension)
    }

    /// 添加常见的图片类型
    pub fn allow_images(self) -> Self {
        ["jpg", "jpeg", "png", "gif"]
            .into_iter()
            .fold(self, Self::allow_extension)
    }

    /// 添加常见的视频类型
    pub fn allow_videos(self) -> Self {
        ["mp4", "avi", "mov"]
            .into_iter()
            .fold(self, Self::allow_extension)
    }

    /// 设置大小上限
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = bytes;
        self
    }

    pub fn size_limit(&self) -> u64 {
        self.max_size
    }

    /// 大小是否在上限之内
    pub fn check_size(&self, size: u64) -> bool {
        size <= self.max_size
    }

    /// 验证文件类型（按最后一个点之后的扩展名，忽略大小写）
    pub fn validate(&self, filename: &str) -> bool {
        match split_file_name(filename).1 {
            Some(ext) => self.allowed_extensions.contains(&ext.to_lowercase()),
            None => false,
        }
    }

    /// 允许的扩展名，带前导点，例如 `.pdf`
    pub fn allowed_extensions(&self) -> Vec<String> {
        self.allowed_extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect()
    }
}

impl Default for FileValidator {
    /// 教学资源允许的文档、图片和视频类型
    fn default() -> Self {
        Self::new().allow_documents().allow_images().allow_videos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_validator() {
        let validator = FileValidator::new().allow_images();

        assert!(validator.validate("test.jpg"));
        assert!(validator.validate("test.png"));
        assert!(!validator.validate("test.pdf"));

        let validator = FileValidator::new().allow_images().allow_documents();

        assert!(validator.validate("test.jpg"));
        assert!(validator.validate("test.pdf"));
    }

    #[test]
    fn test_default_allow_list() {
        let validator = FileValidator::default();
        for name in [
            "a.pdf", "a.doc", "a.docx", "a.ppt", "a.pptx", "a.jpg", "a.jpeg", "a.png", "a.gif",
            "a.mp4", "a.avi", "a.mov",
        ] {
            assert!(validator.validate(name), "{name} should be allowed");
        }
        for name in ["a.exe", "a.sh", "a.html", "a.pdf.exe", "pdf", "a.", ".pdf", "a.xlsx"] {
            assert!(!validator.validate(name), "{name} should be rejected");
        }
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let validator = FileValidator::default();
        assert!(validator.validate("Lecture.MP4"));
        assert!(validator.validate("scan.JpEg"));
    }

    #[test]
    fn test_allowed_extensions_keep_order() {
        let validator = FileValidator::default();
        assert_eq!(
            validator.allowed_extensions().join(", "),
            ".pdf, .doc, .docx, .ppt, .pptx, .jpg, .jpeg, .png, .gif, .mp4, .avi, .mov"
        );
    }

    #[test]
    fn test_size_limit() {
        let validator = FileValidator::default();
        assert_eq!(validator.size_limit(), 50 * 1024 * 1024);
        assert!(validator.check_size(50 * 1024 * 1024));
        assert!(!validator.check_size(60 * 1024 * 1024));

        let small = FileValidator::default().max_size(10);
        assert!(small.check_size(10));
        assert!(!small.check_size(11));
    }

    #[test]
    fn test_allow_extension_normalizes() {
        let validator = FileValidator::new().allow_extension(".ODT");
        assert!(validator.validate("essay.odt"));
        assert_eq!(validator.allowed_extensions(), vec![".odt".to_string()]);
    }
}
