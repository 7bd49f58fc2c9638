use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// 客户端提交的文件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingFile {
    /// 原始文件名
    pub name: String,

    /// 文件大小（字节），超限时内容可能被截断，但大小仍为实际接收的字节数
    pub size: u64,

    /// 文件内容
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }
}

/// 上传表单
/// 各字段在解析阶段可能缺失，由上传流程统一校验
#[derive(Debug, Clone, Default)]
pub struct UploadSubmission {
    pub file: Option<IncomingFile>,
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub medium: Option<String>,
}

impl UploadSubmission {
    pub fn new(
        file: IncomingFile,
        grade: impl Into<String>,
        subject: impl Into<String>,
        medium: impl Into<String>,
    ) -> Self {
        Self {
            file: Some(file),
            grade: Some(grade.into()),
            subject: Some(subject.into()),
            medium: Some(medium.into()),
        }
    }
}

/// 清洗后的分类目录（grade/subject/medium）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxonomyPath {
    pub grade: String,
    pub subject: String,
    pub medium: String,
}

impl TaxonomyPath {
    pub fn segments(&self) -> [&str; 3] {
        [&self.grade, &self.subject, &self.medium]
    }
}

impl fmt::Display for TaxonomyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.grade, self.subject, self.medium)
    }
}

/// 已写入磁盘的文件
/// `file_url` 与 `relative_path` 由调用方写入元数据存储
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// 站点绝对路径，例如 `/uploads/Grade_10/Math/English/xxx.pdf`
    pub file_url: String,

    /// 相对公共目录的路径，始终使用 `/` 分隔
    pub relative_path: String,

    /// 生成的文件名
    pub file_name: String,

    /// 文件大小（字节）
    pub file_size: u64,
}

/// 删除结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedFile {
    /// 调用方提交的相对路径
    pub relative_path: String,

    /// 因变空而被移除的目录，按移除顺序排列
    pub removed_dirs: Vec<PathBuf>,
}
