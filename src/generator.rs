use crate::asset::{resolve, Asset, AssetKind};
use crate::config::Settings;
use crate::document::Document;
use crate::info::Info;
use crate::invoice::InvoiceRequest;
use crate::layout::{layout_invoice, LayoutSettings};
use crate::render::render;
use crate::store::{Artifact, ArtifactStore};
use crate::InvoiceError;

/// Produces and stores invoice PDFs. A generator holds no per-request state, so a
/// single instance can serve any number of threads at once.
pub struct InvoiceGenerator<S: ArtifactStore> {
    layout: LayoutSettings,
    store: S,
}

impl<S: ArtifactStore> InvoiceGenerator<S> {
    pub fn new(settings: &Settings, store: S) -> InvoiceGenerator<S> {
        InvoiceGenerator {
            layout: settings.layout(),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Render `request` with its optional logo and signature and store the result.
    /// Nothing is stored unless every step before it succeeded.
    #[tracing::instrument(
        name = "generate_invoice",
        skip_all,
        fields(invoice_no = %request.invoice.invoice_no)
    )]
    pub fn generate(
        &self,
        request: &InvoiceRequest,
        logo: Option<Asset>,
        signature: Option<Asset>,
    ) -> Result<Artifact, InvoiceError> {
        let logo = resolve(AssetKind::Logo, logo)?;
        let signature = resolve(AssetKind::Signature, signature)?;

        let mut document = Document::default();
        document.set_info(Info::for_invoice(
            &request.invoice.invoice_no,
            &request.order.order_no,
            &request.seller.name,
        ));
        let logo = logo.map(|image| document.add_image(image));
        let signature = signature.map(|image| document.add_image(image));

        let commands = layout_invoice(request, logo, signature, &self.layout);

        let mut pdf: Vec<u8> = Vec::new();
        render(document, &commands, self.layout.page_size, &mut pdf)?;

        let artifact = self.store.store(&request.invoice.invoice_no, &pdf)?;
        tracing::info!(
            path = %artifact.retrieval_path,
            bytes = artifact.size,
            "invoice generated"
        );
        Ok(artifact)
    }
}
