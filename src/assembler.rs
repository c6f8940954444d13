//! Interaction assembly.
//!
//! Records come from two places: lines drawn between two catalogued
//! entities, and co-membership in a molecular complex. Records are handed
//! to the sink as soon as they are built, connections first (in document
//! order) and then complexes.

use log::debug;

use crate::catalog::{Entity, EntityCatalog};
use crate::complex::Complex;
use crate::error::Result;
use crate::model::{
    ComplexPairing, InteractionKind, InteractionRecord, Participant, Pathway,
};
use crate::report::RecordSink;
use crate::resolver::IdResolver;

pub struct InteractionAssembler<'r, 'm> {
    resolver: &'r IdResolver<'m>,
    pairing: ComplexPairing,
}

impl<'r, 'm> InteractionAssembler<'r, 'm> {
    pub fn new(resolver: &'r IdResolver<'m>, pairing: ComplexPairing) -> Self {
        Self { resolver, pairing }
    }

    /// Emit one record per connection whose endpoints are both catalogued.
    pub fn assemble_connections(
        &self,
        pathway: &Pathway,
        catalog: &EntityCatalog,
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let mut emitted = 0;
        for connection in pathway.connections() {
            let endpoints = connection
                .start
                .as_deref()
                .and_then(|handle| catalog.get(handle))
                .zip(connection.end.as_deref().and_then(|handle| catalog.get(handle)));
            let Some((start, end)) = endpoints else {
                debug!(line = connection.graph_id.as_deref().unwrap_or("?"); "Skipping unconnected line");
                continue;
            };

            sink.emit(InteractionRecord {
                source: self.participant(start),
                target: self.participant(end),
                kind: InteractionKind::Drawn(connection.edge_kind.clone()),
                pathway: pathway.name.clone(),
            })?;
            emitted += 1;
        }
        Ok(emitted)
    }

    /// Emit covalent-binding records for the members of each complex.
    pub fn assemble_complexes(
        &self,
        pathway: &Pathway,
        complexes: &[Complex],
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let mut emitted = 0;
        for complex in complexes {
            emitted += self.assemble_complex(&pathway.name, &complex.members, sink)?;
        }
        Ok(emitted)
    }

    fn assemble_complex(
        &self,
        pathway: &str,
        members: &[&Entity],
        sink: &mut dyn RecordSink,
    ) -> Result<usize> {
        let n = members.len();
        let mut emitted = 0;
        for i in 0..n {
            let source = self.participant(members[i]);
            let partners: Box<dyn Iterator<Item = usize>> = match self.pairing {
                ComplexPairing::Distinct => Box::new(i + 1..n),
                ComplexPairing::Literal => Box::new((2..n).rev()),
            };
            for j in partners {
                sink.emit(InteractionRecord {
                    source: source.clone(),
                    target: self.participant(members[j]),
                    kind: InteractionKind::CovalentBinding,
                    pathway: pathway.to_string(),
                })?;
                emitted += 1;
            }
        }
        Ok(emitted)
    }

    fn participant(&self, entity: &Entity) -> Participant {
        let xref = self.resolver.resolve(
            &entity.molecular_type,
            &entity.xref.id,
            Some(&entity.xref.source),
        );
        entity.participant(xref)
    }
}
