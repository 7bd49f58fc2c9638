use std::path::{Component, Path, PathBuf};

/// 路径守卫
/// 将相对路径解析到公共目录下，并确认结果位于存储根目录之内
#[derive(Debug, Clone)]
pub struct PathGuard {
    public_root: PathBuf,
    storage_root: PathBuf,
}

impl PathGuard {
    /// `public_root` 必须为绝对路径，存储根目录为 `public_root/uploads_dir`
    pub fn new(public_root: impl AsRef<Path>, uploads_dir: &str) -> Self {
        let public_root = normalize(public_root.as_ref());
        let storage_root = normalize(&public_root.join(uploads_dir));
        Self {
            public_root,
            storage_root,
        }
    }

    pub fn public_root(&self) -> &Path {
        &self.public_root
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// 相对公共目录解析并规范化，不访问文件系统
    pub fn resolve(&self, candidate: &str) -> PathBuf {
        normalize(&self.public_root.join(candidate))
    }

    /// 解析结果位于存储根目录（含根目录本身）时返回绝对路径
    pub fn confine(&self, candidate: &str) -> Option<PathBuf> {
        let resolved = self.resolve(candidate);
        self.contains(&resolved).then_some(resolved)
    }

    pub fn is_safe(&self, candidate: &str) -> bool {
        self.confine(candidate).is_some()
    }

    /// 按路径组件比较，`uploads-evil` 不会被视为 `uploads` 的子目录
    pub fn contains(&self, absolute: &Path) -> bool {
        absolute.starts_with(&self.storage_root)
    }

    /// 相对公共目录的 POSIX 风格路径
    pub fn relative_to_public(&self, absolute: &Path) -> Option<String> {
        let relative = absolute.strip_prefix(&self.public_root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

/// 词法规范化：去掉 `.`，`..` 回退一级（不越过根）
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
